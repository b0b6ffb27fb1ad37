//! Functions, variables, constants, flow control and closures.

use crate::error::Result;
use crate::tour::{type_name_of, Tour};
use chrono::{Datelike, Local, Timelike, Weekday};
use std::f64::consts::PI;
use std::fmt;
use std::io::Write;

pub const GOLDEN_RATIO: f64 = 1.618034;
pub const BIG: u128 = 1 << 100;
pub const SMALL: u128 = BIG >> 99;

// =============================================================================
// Functions and results
// =============================================================================

pub fn add(x: i64, y: i64) -> i64 {
    x + y
}

pub fn swap<'a>(x: &'a str, y: &'a str) -> (&'a str, &'a str) {
    (y, x)
}

/// Splits `sum` into roughly four ninths and the remainder.
pub fn split(sum: i64) -> (i64, i64) {
    let x = sum * 4 / 9;
    let y = sum - x;
    (x, y)
}

pub fn need_int(x: i64) -> i64 {
    x * 10 + 1
}

pub fn need_float(x: f64) -> f64 {
    x * 0.1
}

// =============================================================================
// Complex numbers (just enough for a principal square root)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Principal square root: non-negative real part, branch cut on the negative real axis.
    pub fn sqrt(&self) -> Complex {
        let r = self.norm();
        let re = ((r + self.re) / 2.0).sqrt();
        let im = ((r - self.re) / 2.0).sqrt().copysign(self.im);
        Complex::new(re, im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re, self.im)
    }
}

// =============================================================================
// Flow control helpers
// =============================================================================

pub fn sqrt_string(x: f64) -> String {
    if x < 0.0 {
        return sqrt_string(-x) + "i";
    }
    x.sqrt().to_string()
}

pub fn pow(x: f64, n: f64, lim: f64) -> f64 {
    let v = x.powf(n);
    if v < lim {
        v
    } else {
        lim
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitExceeded {
    pub value: f64,
    pub lim: f64,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pow2 failed: {} >= {}", self.value, self.lim)
    }
}

/// Like [`pow`], but reports when the limit was hit.
pub fn pow_checked(x: f64, n: f64, lim: f64) -> std::result::Result<f64, LimitExceeded> {
    let value = x.powf(n);
    if value < lim {
        Ok(value)
    } else {
        Err(LimitExceeded { value, lim })
    }
}

pub fn os_name(os: &str) -> String {
    match os {
        "macos" => "OS X.".to_string(),
        "linux" => "Linux.".to_string(),
        other => format!("{other}."),
    }
}

pub fn when_is_saturday(today: Weekday) -> &'static str {
    let days = (Weekday::Sat.num_days_from_monday() + 7 - today.num_days_from_monday()) % 7;
    match days {
        0 => "Today.",
        1 => "Tomorrow.",
        2 => "In two days.",
        _ => "Too far away.",
    }
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        h if h < 12 => "Good morning!",
        h if h < 17 => "Good afternoon!",
        _ => "Good evening!",
    }
}

// =============================================================================
// Function values and closures
// =============================================================================

pub fn hypot(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

pub fn compute(f: impl Fn(f64, f64) -> f64) -> f64 {
    f(3.0, 4.0)
}

/// Each returned closure keeps its own running total.
pub fn adder() -> impl FnMut(i64) -> i64 {
    let mut sum = 0;
    move |x| {
        sum += x;
        sum
    }
}

// =============================================================================
// Sections
// =============================================================================

pub fn imports(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "Now you have {} problems", 7f64.sqrt())?;
    Ok(())
}

pub fn exported_names(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "PI = {PI:.6}")?;
    Ok(())
}

pub fn functions(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "42 + 13 = {}", add(42, 13))?;
    Ok(())
}

pub fn multiple_results(t: &mut Tour<'_>) -> Result<()> {
    let (a, b) = swap("HELLO", "GOODBYE");
    writeln!(t.out, "swap(HELLO, GOODBYE) returns {a} {b}")?;
    Ok(())
}

pub fn named_results(t: &mut Tour<'_>) -> Result<()> {
    let (x, y) = split(17);
    writeln!(t.out, "split(17) returns {x} {y}")?;
    Ok(())
}

pub fn variables(t: &mut Tour<'_>) -> Result<()> {
    let (i, j): (i32, i32) = (1, 2);
    let k = 3;
    let (c, python, java) = (true, false, "NO");
    writeln!(t.out, "i j k c python java = {i} {j} {k} {c} {python} {java}")?;
    Ok(())
}

pub fn basic_types(t: &mut Tour<'_>) -> Result<()> {
    let to_be = false;
    let max_int = u64::MAX;
    let z = Complex::new(-5.0, 12.0).sqrt();
    writeln!(t.out, "Type: {}, Value: {to_be}", type_name_of(&to_be))?;
    writeln!(t.out, "Type: {}, Value: {max_int}", type_name_of(&max_int))?;
    writeln!(t.out, "Type: {}, Value: {z}", type_name_of(&z))?;
    Ok(())
}

pub fn zero_values(t: &mut Tour<'_>) -> Result<()> {
    let i = i32::default();
    let f = f64::default();
    let b = bool::default();
    let s = String::default();
    writeln!(t.out, "i f b s = {i} {f} {b} {s:?}")?;
    Ok(())
}

pub fn type_conversions(t: &mut Tour<'_>) -> Result<()> {
    let (x, y): (i32, i32) = (3, 4);
    let f = f64::from(x * x + y * y).sqrt();
    let z = f as u32;
    writeln!(t.out, "x y z = {x} {y} {z}")?;
    Ok(())
}

pub fn type_inference(t: &mut Tour<'_>) -> Result<()> {
    let v = 42;
    writeln!(t.out, "v is of type {}", type_name_of(&v))?;
    Ok(())
}

pub fn constants(t: &mut Tour<'_>) -> Result<()> {
    const TRUTH: bool = true;
    writeln!(t.out, "Golden Ratio: {GOLDEN_RATIO:.6}")?;
    writeln!(t.out, "Rust rules? {TRUTH}")?;
    Ok(())
}

pub fn numeric_constants(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "need_int(SMALL) returns {}", need_int(SMALL as i64))?;
    writeln!(t.out, "need_float(SMALL) returns {}", need_float(SMALL as f64))?;
    writeln!(t.out, "need_float(BIG) returns {:e}", need_float(BIG as f64))?;
    Ok(())
}

pub fn for_loop(t: &mut Tour<'_>) -> Result<()> {
    let mut sum = 0;
    for i in 0..10 {
        sum += i;
    }
    writeln!(t.out, "sum = {sum}")?;
    Ok(())
}

pub fn while_loop(t: &mut Tour<'_>) -> Result<()> {
    let mut sum = 1;
    while sum < 1000 {
        sum += sum;
    }
    writeln!(t.out, "sum = {sum}")?;
    Ok(())
}

pub fn if_statements(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "sqrt(2) = {}", sqrt_string(2.0))?;
    writeln!(t.out, "sqrt(-4) = {}", sqrt_string(-4.0))?;
    Ok(())
}

pub fn if_with_binding(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "pow(3, 2, 10) = {:.6}", pow(3.0, 2.0, 10.0))?;
    writeln!(t.out, "pow(3, 3, 20) = {:.6}", pow(3.0, 3.0, 20.0))?;
    Ok(())
}

pub fn if_else(t: &mut Tour<'_>) -> Result<()> {
    for (x, n, lim) in [(3.0, 2.0, 10.0), (3.0, 3.0, 20.0)] {
        let value = match pow_checked(x, n, lim) {
            Ok(v) => v,
            Err(e) => {
                writeln!(t.out, "{e}")?;
                e.lim
            }
        };
        writeln!(t.out, "pow2({x}, {n}, {lim}) = {value:.6}")?;
    }
    Ok(())
}

pub fn switch(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "Rust runs on... {}", os_name(std::env::consts::OS))?;
    Ok(())
}

pub fn switch_order(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "When's Saturday?")?;
    writeln!(t.out, "{}", when_is_saturday(Local::now().weekday()))?;
    Ok(())
}

pub fn switch_no_condition(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "{}", greeting(Local::now().hour()))?;
    Ok(())
}

pub fn stacking_defers(t: &mut Tour<'_>) -> Result<()> {
    for i in 0..10 {
        t.defer(format!("defer #{i}"));
        if i == 9 {
            t.defer_banner("Defers");
        }
    }
    writeln!(t.out, "registered 10 deferred messages; they print after the last section")?;
    Ok(())
}

pub fn references(t: &mut Tour<'_>) -> Result<()> {
    let (mut i, mut j) = (42, 2701);

    let p = &mut i;
    writeln!(t.out, "*p = {p}")?;
    *p = 21;
    writeln!(t.out, "i = {i}")?;

    let p = &mut j;
    *p /= 37;
    writeln!(t.out, "j = {j}")?;
    Ok(())
}

pub fn function_values(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "hypot = {:.6}", hypot(5.0, 12.0))?;
    writeln!(t.out, "compute(hypot) = {:.6}", compute(hypot))?;
    writeln!(t.out, "compute(f64::powf) = {:.6}", compute(f64::powf))?;
    Ok(())
}

pub fn closures(t: &mut Tour<'_>) -> Result<()> {
    let (mut pos, mut neg) = (adder(), adder());
    for i in 0..10 {
        writeln!(t.out, "{} {}", pos(i), neg(-2 * i))?;
    }
    Ok(())
}
