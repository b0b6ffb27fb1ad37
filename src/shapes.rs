//! Methods, capability traits, `Display` and dynamic typing with `Any`.
//!
//! Conformance is always declared with an `impl` block; a type with a
//! matching method but no `impl` does not qualify.

use crate::error::Result;
use crate::tour::{type_name_of, Tour};
use std::any::Any;
use std::f64::consts::SQRT_2;
use std::fmt;
use std::io::Write;

// =============================================================================
// Capability traits
// =============================================================================

pub trait Abser {
    fn abs(&self) -> f64;
}

pub trait Messenger: fmt::Debug {
    fn message(&self) -> String;
}

// =============================================================================
// Methods
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MVertex {
    pub x: f64,
    pub y: f64,
}

impl MVertex {
    pub fn new(x: f64, y: f64) -> Self {
        MVertex { x, y }
    }

    pub fn scale(&mut self, f: f64) {
        self.x *= f;
        self.y *= f;
    }
}

impl Abser for MVertex {
    fn abs(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// The method above written as a free function.
pub fn abs(v: MVertex) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MyFloat(pub f64);

impl Abser for MyFloat {
    fn abs(&self) -> f64 {
        if self.0 < 0.0 {
            -self.0
        } else {
            self.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub s: String,
}

impl Messenger for Note {
    fn message(&self) -> String {
        self.s.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Person {
            name: name.into(),
            age,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} years)", self.name, self.age)
    }
}

// =============================================================================
// Describing values
// =============================================================================

pub fn describe<M: Messenger>(m: &M) -> String {
    format!("({m:?}, {})", type_name_of(m))
}

/// `dyn Any` carries a `TypeId` but no name, so names come from this list.
fn any_type_name(value: &dyn Any) -> &'static str {
    if value.is::<bool>() {
        "bool"
    } else if value.is::<f64>() {
        "f64"
    } else if value.is::<i32>() {
        "i32"
    } else if value.is::<&str>() {
        "&str"
    } else if value.is::<String>() {
        "String"
    } else {
        "<unnamed>"
    }
}

/// `None` stands in for an absent value of unknown type.
pub fn describe_any(value: Option<&dyn Any>) -> String {
    let Some(value) = value else {
        return "(<nil>, <nil>)".to_string();
    };
    if let Some(i) = value.downcast_ref::<i32>() {
        format!("({i}, i32)")
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("({s}, &str)")
    } else if let Some(s) = value.downcast_ref::<String>() {
        format!("({s}, String)")
    } else {
        format!("(?, {})", any_type_name(value))
    }
}

/// Dispatches on the runtime type behind `value`.
pub fn type_switch(value: &dyn Any) -> String {
    if let Some(i) = value.downcast_ref::<i32>() {
        format!("Twice {i} is {}", i * 2)
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("{s:?} is {} bytes long", s.len())
    } else if let Some(s) = value.downcast_ref::<String>() {
        format!("{s:?} is {} bytes long", s.len())
    } else {
        format!("I don't know about type {}!", any_type_name(value))
    }
}

// =============================================================================
// Sections
// =============================================================================

pub fn methods(t: &mut Tour<'_>) -> Result<()> {
    let v = MVertex::new(3.0, 4.0);
    writeln!(t.out, "MVertex {{3, 4}}.abs() = {}", v.abs())?;
    Ok(())
}

pub fn methods_are_functions(t: &mut Tour<'_>) -> Result<()> {
    let v = MVertex::new(3.0, 4.0);
    writeln!(t.out, "abs(MVertex {{3, 4}}) = {}", abs(v))?;
    Ok(())
}

pub fn methods_on_newtypes(t: &mut Tour<'_>) -> Result<()> {
    let f = MyFloat(-SQRT_2);
    writeln!(t.out, "MyFloat(-SQRT_2).abs() = {}", f.abs())?;
    Ok(())
}

pub fn mutable_receivers(t: &mut Tour<'_>) -> Result<()> {
    let mut v = MVertex::new(3.0, 4.0);
    v.scale(10.0);
    writeln!(t.out, "MVertex {{3, 4}} scaled by 10, abs = {}", v.abs())?;
    Ok(())
}

pub fn traits(t: &mut Tour<'_>) -> Result<()> {
    let shapes: Vec<Box<dyn Abser>> = vec![
        Box::new(MyFloat(-SQRT_2)),
        Box::new(MVertex::new(3.0, 4.0)),
    ];
    for shape in &shapes {
        writeln!(t.out, "abs = {}", shape.abs())?;
    }
    Ok(())
}

pub fn explicit_impls(t: &mut Tour<'_>) -> Result<()> {
    let m: &dyn Messenger = &Note { s: "hello".into() };
    writeln!(t.out, "message = {}", m.message())?;
    Ok(())
}

pub fn trait_values(t: &mut Tour<'_>) -> Result<()> {
    let value = Note { s: "hello".into() };
    writeln!(t.out, "value = {}", describe(&value))?;
    writeln!(t.out, "message = {}", value.message())?;
    Ok(())
}

pub fn any_values(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "value = {}", describe_any(None))?;
    writeln!(t.out, "value = {}", describe_any(Some(&42i32)))?;
    writeln!(t.out, "value = {}", describe_any(Some(&"hello")))?;
    Ok(())
}

pub fn downcasting(t: &mut Tour<'_>) -> Result<()> {
    let value: Box<dyn Any> = Box::new("hello");

    if let Some(s) = value.downcast_ref::<&str>() {
        writeln!(t.out, "value = {s}")?;
    }
    let s = value.downcast_ref::<&str>();
    writeln!(t.out, "value, &str? = {:?} {}", s.copied().unwrap_or_default(), s.is_some())?;
    let f = value.downcast_ref::<f64>();
    writeln!(t.out, "value, f64? = {} {}", f.copied().unwrap_or_default(), f.is_some())?;
    Ok(())
}

pub fn type_switches(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "type_switch(21) = {}", type_switch(&21i32))?;
    writeln!(t.out, "type_switch(\"hello\") = {}", type_switch(&"hello"))?;
    writeln!(t.out, "type_switch(true) = {}", type_switch(&true))?;
    Ok(())
}

pub fn stringers(t: &mut Tour<'_>) -> Result<()> {
    let jim = Person::new("Jim Halpert", 29);
    let pam = Person::new("Pam Halpert", 28);
    writeln!(t.out, "{jim} {pam}")?;
    Ok(())
}
