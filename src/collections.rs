//! Structs, arrays, slices, vectors and maps.

use crate::error::Result;
use crate::tour::Tour;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

/// `"{name} length = .. | capacity = .. | value = [..]"` for an owned vector.
pub fn describe_vec(name: &str, v: &Vec<i32>) -> String {
    format!(
        "{name} length = {} | capacity = {} | value = {:?}",
        v.len(),
        v.capacity(),
        v
    )
}

/// Borrowed views have a length but no capacity of their own.
pub fn describe_view(name: &str, v: &[i32]) -> String {
    format!("{name} length = {} | value = {:?}", v.len(), v)
}

pub fn tic_tac_toe() -> Vec<Vec<&'static str>> {
    let mut board = vec![vec!["_"; 3]; 3];
    board[0][0] = "X";
    board[2][2] = "O";
    board[1][2] = "X";
    board[1][0] = "O";
    board[0][2] = "X";
    board
}

pub fn render_board(board: &[Vec<&str>]) -> String {
    board.iter().map(|row| row.iter().join(" ")).join("\n")
}

pub fn powers_of_two(n: usize) -> Vec<u64> {
    (0..n).map(|i| 1u64 << i).collect()
}

pub fn landmarks() -> BTreeMap<&'static str, Location> {
    BTreeMap::from([
        (
            "Bell Labs",
            Location {
                lat: 40.68433,
                long: -74.39967,
            },
        ),
        (
            "Google",
            Location {
                lat: 37.42202,
                long: -122.08408,
            },
        ),
    ])
}

// =============================================================================
// Sections
// =============================================================================

pub fn structs(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "x = 1, y = 2")?;
    writeln!(t.out, "Vertex = {:?}", Vertex { x: 1, y: 2 })?;
    Ok(())
}

pub fn struct_fields(t: &mut Tour<'_>) -> Result<()> {
    let mut v = Vertex { x: 1, y: 2 };
    v.x = 4;
    writeln!(t.out, "x changed to 4")?;
    writeln!(t.out, "Vertex = {v:?}")?;
    Ok(())
}

pub fn struct_references(t: &mut Tour<'_>) -> Result<()> {
    let mut v = Vertex { x: 4, y: 2 };
    let p = &mut v;
    p.y = 1_000_000_000;
    writeln!(t.out, "y changed to 1000000000")?;
    writeln!(t.out, "Vertex = {v:?}")?;
    Ok(())
}

pub fn struct_literals(t: &mut Tour<'_>) -> Result<()> {
    let v1 = Vertex { x: 1, y: 2 };
    let v2 = Vertex {
        x: 1,
        ..Default::default()
    };
    let v3 = Vertex::default();
    let p = &Vertex { x: 1, y: 2 };
    writeln!(t.out, "v1 p v2 v3 = {v1:?} {p:?} {v2:?} {v3:?}")?;
    Ok(())
}

pub fn arrays(t: &mut Tour<'_>) -> Result<()> {
    let mut a = [""; 2];
    a[0] = "Hello";
    a[1] = "World";
    writeln!(t.out, "a[0] a[1] = {} {}", a[0], a[1])?;
    writeln!(t.out, "a = {a:?}")?;

    let primes = [2, 3, 5, 7, 11, 13];
    writeln!(t.out, "primes = {primes:?}")?;
    Ok(())
}

pub fn slices(t: &mut Tour<'_>) -> Result<()> {
    let primes = [2, 3, 5, 7, 11, 13];
    let s: &[i32] = &primes[1..4];
    writeln!(t.out, "primes[1..4] = {s:?}")?;
    Ok(())
}

pub fn slice_views(t: &mut Tour<'_>) -> Result<()> {
    let mut names = ["Jim", "Pam", "Dwight", "Michael"];
    writeln!(t.out, "names = {names:?}")?;
    {
        let (a, b) = (&names[0..2], &names[1..3]);
        writeln!(t.out, "a b = {a:?} {b:?}")?;
        writeln!(t.out, "b[1] = {}", b[1])?;
    }

    let b = &mut names[1..3];
    b[1] = "XXX";
    writeln!(t.out, "b[1] set to XXX")?;

    let (a, b) = (&names[0..2], &names[1..3]);
    writeln!(t.out, "a b = {a:?} {b:?}")?;
    writeln!(t.out, "names = {names:?}")?;
    Ok(())
}

pub fn slice_literals(t: &mut Tour<'_>) -> Result<()> {
    let flags = vec![true, false, true, true, false, true];
    writeln!(t.out, "flags = {flags:?}")?;

    let pairs = vec![(2, true), (3, false), (5, true), (7, true), (11, false), (13, true)];
    writeln!(t.out, "pairs = {pairs:?}")?;
    Ok(())
}

pub fn slice_defaults(t: &mut Tour<'_>) -> Result<()> {
    let primes = [2, 3, 5, 7, 11, 13];
    writeln!(t.out, "primes[1..4] = {:?}", &primes[1..4])?;
    writeln!(t.out, "primes[..2] = {:?}", &primes[..2])?;
    writeln!(t.out, "primes[1..] = {:?}", &primes[1..])?;
    Ok(())
}

pub fn length_and_capacity(t: &mut Tour<'_>) -> Result<()> {
    let mut s = vec![2, 3, 5, 7, 11, 13];
    writeln!(t.out, "{}", describe_vec("s", &s))?;
    writeln!(t.out, "{}", describe_view("&s[..0]", &s[..0]))?;
    writeln!(t.out, "{}", describe_view("&s[..4]", &s[..4]))?;
    writeln!(t.out, "{}", describe_view("&s[2..]", &s[2..]))?;
    s.truncate(4);
    writeln!(t.out, "{}", describe_vec("s.truncate(4)", &s))?;
    Ok(())
}

pub fn empty_slices(t: &mut Tour<'_>) -> Result<()> {
    for (name, v) in [("empty", Vec::new()), ("filled", vec![9, 233, -4])] {
        writeln!(t.out, "{}", describe_vec(name, &v))?;
        if v.is_empty() {
            writeln!(t.out, "EMPTY")?;
        }
    }
    Ok(())
}

pub fn with_capacity(t: &mut Tour<'_>) -> Result<()> {
    let zeroed = vec![0; 5];
    writeln!(t.out, "{}", describe_vec("vec![0; 5]", &zeroed))?;

    let mut reserved: Vec<i32> = Vec::with_capacity(5);
    writeln!(t.out, "{}", describe_vec("Vec::with_capacity(5)", &reserved))?;
    reserved.extend([0, 0]);
    writeln!(t.out, "{}", describe_vec("after extending by 2", &reserved))?;
    Ok(())
}

pub fn slices_of_slices(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "{}", render_board(&tic_tac_toe()))?;
    Ok(())
}

pub fn appending(t: &mut Tour<'_>) -> Result<()> {
    let mut s = Vec::new();
    writeln!(t.out, "{}", describe_vec("s", &s))?;
    s.push(0);
    writeln!(t.out, "{}", describe_vec("s + 0", &s))?;
    s.push(1);
    writeln!(t.out, "{}", describe_vec("s + 1", &s))?;
    s.extend([2, 3, 4]);
    writeln!(t.out, "{}", describe_vec("s + 2, 3, 4", &s))?;
    Ok(())
}

pub fn range(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "2^i:")?;
    for (i, v) in powers_of_two(8).iter().enumerate() {
        writeln!(t.out, "2^{i} = {v}")?;
    }
    writeln!(t.out, "2^i:")?;
    for v in powers_of_two(10) {
        writeln!(t.out, "{v}")?;
    }
    Ok(())
}

pub fn maps(t: &mut Tour<'_>) -> Result<()> {
    let mut m = HashMap::new();
    m.insert(
        "Bell Labs",
        Location {
            lat: 40.68433,
            long: -74.39967,
        },
    );
    if let Some(loc) = m.get("Bell Labs") {
        writeln!(t.out, "Bell Labs is at {loc:?}")?;
    }
    Ok(())
}

pub fn map_literals(t: &mut Tour<'_>) -> Result<()> {
    writeln!(t.out, "landmarks = {:?}", landmarks())?;
    Ok(())
}

pub fn mutating_maps(t: &mut Tour<'_>) -> Result<()> {
    let mut m: HashMap<&str, i32> = HashMap::new();
    m.insert("Answer", 42);
    writeln!(t.out, "Answer = {}", m["Answer"])?;

    m.insert("Answer", 82);
    writeln!(t.out, "Answer changed to 82")?;
    writeln!(t.out, "Answer = {}", m["Answer"])?;

    m.remove("Answer");
    writeln!(t.out, "Answer = {}", m.get("Answer").copied().unwrap_or_default())?;

    let v = m.get("Answer");
    writeln!(
        t.out,
        "Answer = {} Present? {}",
        v.copied().unwrap_or_default(),
        v.is_some()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(section: fn(&mut Tour<'_>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        let mut tour = Tour::for_tests(&mut buf);
        section(&mut tour).unwrap();
        drop(tour);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_describe_view() {
        let primes = [2, 3, 5, 7, 11, 13];
        assert_eq!(
            describe_view("p", &primes[2..]),
            "p length = 4 | value = [5, 7, 11, 13]"
        );
    }

    #[test]
    fn test_describe_empty_vec() {
        assert_eq!(
            describe_vec("e", &Vec::new()),
            "e length = 0 | capacity = 0 | value = []"
        );
    }

    #[test]
    fn test_board_rendering() {
        assert_eq!(render_board(&tic_tac_toe()), "X _ X\nO _ X\n_ _ O");
    }

    #[test]
    fn test_powers_of_two() {
        assert_eq!(powers_of_two(0), Vec::<u64>::new());
        assert_eq!(powers_of_two(8), vec![1, 2, 4, 8, 16, 32, 64, 128]);
    }

    #[test]
    fn test_landmarks_sorted() {
        let keys: Vec<_> = landmarks().keys().copied().collect();
        assert_eq!(keys, vec!["Bell Labs", "Google"]);
    }

    #[test]
    fn test_mutation_visible_through_views() {
        let text = capture(slice_views);
        assert!(text.contains(r#"a b = ["Jim", "Pam"] ["Pam", "XXX"]"#));
        assert!(text.contains(r#"names = ["Jim", "Pam", "XXX", "Michael"]"#));
    }

    #[test]
    fn test_mutating_maps_output() {
        let text = capture(mutating_maps);
        assert_eq!(
            text,
            "Answer = 42\nAnswer changed to 82\nAnswer = 82\nAnswer = 0\nAnswer = 0 Present? false\n"
        );
    }

    #[test]
    fn test_truncate_keeps_capacity() {
        let text = capture(length_and_capacity);
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("s.truncate(4) length = 4 | capacity = "));
        assert!(last.ends_with("value = [2, 3, 5, 7]"));
    }

    #[test]
    fn test_empty_slice_flagged() {
        let text = capture(empty_slices);
        assert_eq!(text.matches("EMPTY").count(), 1);
    }
}
