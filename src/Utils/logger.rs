use chrono::Local;
use csv::Writer;
use log::info;
use simplelog::*;
use std::fs::File;
use std::io::{self, Write};

/// Console-only logging through simplelog. A second call finds the global
/// logger already set and leaves it alone, so library tests and the demo
/// binary may both call this.
pub fn init_console_logging(level: LevelFilter) {
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);

    match logger_instance {
        Ok(()) => {
            info!(" \n \n Program started with loglevel: {}", level);
        }
        Err(_) => {} // logger already installed by an earlier call
    }
}

/// Console plus file logging; the file is `log_<date>_<time>.txt` in the
/// working directory. Same double-init tolerance as the console variant.
pub fn init_combined_logging(level: LevelFilter) {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let name = format!("log_{}.txt", date_and_time);
    let logger_instance = CombinedLogger::init(vec![
        TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, Config::default(), File::create(name).unwrap()),
    ]);

    match logger_instance {
        Ok(()) => {
            info!(" \n \n Program started with loglevel: {}", level);
        }
        Err(_) => {}
    }
}

/// Write an iteration history (or any header + string rows) as a
/// tab-separated text file.
pub fn save_history_to_file(
    headers: &[String],
    rows: &[Vec<String>],
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", headers.join("\t"))?;
    for row in rows {
        writeln!(file, "{}", row.join("\t"))?;
    }

    Ok(())
}

/// Write an iteration history as CSV. The header/row shapes come from the
/// `Utils::reports` row builders.
pub fn save_history_to_csv(
    headers: &[String],
    rows: &[Vec<String>],
    filename: &str,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}
