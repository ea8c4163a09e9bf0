//! Natural (numeric-aware) ordering and unique-name generation for
//! workspace names.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use compact_str::CompactString;

/// Orders names so that runs of decimal digits compare by numeric value and
/// everything else compares case-insensitively by code point. Display order
/// only; storage-key equality stays exact string match.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let mut xs = a.chars().peekable();
    let mut ys = b.chars().peekable();

    loop {
        let (x, y) = match (xs.peek().copied(), ys.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => (x, y),
        };

        if x.is_ascii_digit() && y.is_ascii_digit() {
            match compare_number_runs(&mut xs, &mut ys) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        match fold(x).cmp(&fold(y)) {
            Ordering::Equal => {
                xs.next();
                ys.next();
            }
            other => return other,
        }
    }
}

fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Consumes the digit run at the head of both iterators. Equal values with
/// different spellings order the one with fewer leading zeros first so the
/// result is still a total order.
fn compare_number_runs(
    xs: &mut Peekable<Chars<'_>>,
    ys: &mut Peekable<Chars<'_>>,
) -> Ordering {
    let x_zeros = skip_zeros(xs);
    let y_zeros = skip_zeros(ys);

    let x_len = digit_run_len(xs);
    let y_len = digit_run_len(ys);
    if x_len != y_len {
        return x_len.cmp(&y_len);
    }

    for _ in 0..x_len {
        let (Some(x), Some(y)) = (xs.next(), ys.next()) else {
            return Ordering::Equal;
        };
        if x != y {
            return x.cmp(&y);
        }
    }

    x_zeros.cmp(&y_zeros)
}

fn skip_zeros(it: &mut Peekable<Chars<'_>>) -> usize {
    let mut count = 0;
    while matches!(it.peek(), Some('0')) {
        it.next();
        count += 1;
    }
    count
}

fn digit_run_len(it: &Peekable<Chars<'_>>) -> usize {
    it.clone().take_while(|ch| ch.is_ascii_digit()).count()
}

/// First free name of the form `"<source> (copy)"`, `"<source> (copy 2)"`,
/// `"<source> (copy 3)"`, ...
pub fn copy_name<F>(source: &str, taken: F) -> CompactString
where
    F: Fn(&str) -> bool,
{
    let first = CompactString::from(format!("{source} (copy)"));
    if !taken(&first) {
        return first;
    }

    let mut suffix = 2u32;
    loop {
        let candidate = CompactString::from(format!("{source} (copy {suffix})"));
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/naming.rs"]
mod tests;
