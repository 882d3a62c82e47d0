// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples_and_utils;
pub mod Utils;
pub mod calculus;
pub mod interpolate;
pub mod linsys;
pub mod regression;
pub mod roots;
pub mod symbolic;
