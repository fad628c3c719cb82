//! Message rendering.
//!
//! Arguments are passed as a slice of [`Value`]s and rendered in one of two
//! modes: printf-style substitution into a template ([`sprintf`]), or plain
//! concatenation of each argument's default form ([`sprint`]).
//!
//! Supported verbs: `%v %s %d %f %F %e %E %g %G %x %X %o %b %t %c %q %%`, with
//! the flags `- + 0 #` and space, a width and a `.precision`. Problems are
//! rendered inline instead of failing:
//!
//! - `%!d(string=x)`: the argument cannot be rendered with that verb
//! - `%!d(MISSING)`: the template asks for more arguments than were given
//! - `%!(NOVERB)`: the template ends with a lone `%`
//! - `%!(EXTRA int=1, string=x)`: arguments left over after the template
//! - `%!(BADWIDTH)` / `%!(BADPREC)`: a width or precision above one million;
//!   the argument is then rendered without it

use std::borrow::Cow;
use std::fmt::{self, Write as _};

/// Largest accepted width or precision.
const MAX_WIDTH: usize = 1_000_000;

/// A single message argument.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(&'a str),
    /// Anything else that implements `Display`.
    Display(&'a dyn fmt::Display),
    /// Anything else that implements `Debug`.
    Debug(&'a dyn fmt::Debug),
}

impl<'a> Value<'a> {
    /// Wrap any `Display` type.
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        Value::Display(value)
    }

    /// Wrap any `Debug` type.
    pub fn debug<T: fmt::Debug>(value: &'a T) -> Self {
        Value::Debug(value)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Display(_) | Value::Debug(_) => "value",
        }
    }

    fn write_default(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Value::Bool(b) => write!(out, "{}", b),
            Value::Int(i) => write!(out, "{}", i),
            Value::Uint(u) => write!(out, "{}", u),
            Value::Float(x) => write!(out, "{}", x),
            Value::Char(c) => write!(out, "{}", c),
            Value::Str(s) => write!(out, "{}", s),
            Value::Display(d) => write!(out, "{}", d),
            Value::Debug(d) => write!(out, "{:?}", d),
        };
    }

    fn default_string(&self) -> String {
        let mut s = String::new();
        self.write_default(&mut s);
        s
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.default_string())
    }
}

/// Conversion into a message argument.
///
/// Implemented for the primitive types, strings and references to them. Wrap
/// other types with [`Value::display`] or [`Value::debug`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        *self
    }
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value!(Uint as u64: u8, u16, u32, u64, usize);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for fmt::Arguments<'_> {
    fn to_value(&self) -> Value<'_> {
        Value::Display(self)
    }
}

impl ToValue for std::io::Error {
    fn to_value(&self) -> Value<'_> {
        Value::Display(self)
    }
}

/// Concatenate the default form of every argument, without separators.
pub fn sprint(args: &[Value<'_>]) -> String {
    let mut out = String::new();
    for arg in args {
        arg.write_default(&mut out);
    }
    out
}

/// Substitute `args` into a printf-style `template`.
pub fn sprintf(template: &str, args: &[Value<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut conv = Conversion::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => conv.minus = true,
                '+' => conv.plus = true,
                '0' => conv.zero = true,
                ' ' => conv.space = true,
                '#' => conv.sharp = true,
                _ => break,
            }
            chars.next();
        }
        conv.width = take_number(&mut chars);
        if conv.width.is_some_and(|w| w > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            conv.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let precision = take_number(&mut chars).unwrap_or(0);
            if precision > MAX_WIDTH {
                out.push_str("%!(BADPREC)");
            } else {
                conv.precision = Some(precision);
            }
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                conv.verb = verb;
                conv.render(arg, &mut out);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(arg.type_name());
            out.push('=');
            arg.write_default(&mut out);
        }
        out.push(')');
    }

    out
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut n: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = Some(n.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }
    n
}

#[derive(Debug, Default)]
struct Conversion {
    minus: bool,
    plus: bool,
    zero: bool,
    space: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Conversion {
    fn render(&self, arg: &Value<'_>, out: &mut String) {
        let rendered = match arg {
            Value::Int(i) => self.integer(*i < 0, i.unsigned_abs()),
            Value::Uint(u) => self.integer(false, *u),
            Value::Float(x) => self.float(*x),
            Value::Bool(b) => match self.verb {
                't' | 'v' | 's' => Some((b.to_string(), false)),
                _ => None,
            },
            Value::Char(c) => self.character(*c),
            Value::Str(s) => self.text(s),
            Value::Display(_) | Value::Debug(_) => self.text(&arg.default_string()),
        };

        match rendered {
            Some((body, numeric)) => self.pad(&body, numeric, out),
            None => {
                let _ = write!(out, "%!{}({}=", self.verb, arg.type_name());
                arg.write_default(out);
                out.push(')');
            }
        }
    }

    fn integer(&self, negative: bool, magnitude: u64) -> Option<(String, bool)> {
        let (digits, prefix) = match self.verb {
            'd' | 'v' | 's' => (magnitude.to_string(), ""),
            'x' => (format!("{:x}", magnitude), "0x"),
            'X' => (format!("{:X}", magnitude), "0X"),
            'o' => (format!("{:o}", magnitude), "0"),
            'b' => (format!("{:b}", magnitude), "0b"),
            'c' | 'q' => {
                let c = u32::try_from(magnitude)
                    .ok()
                    .filter(|_| !negative)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return self.character(c);
            }
            _ => return None,
        };

        // An explicit precision is a minimum digit count and disables zero padding.
        let zeros = match self.precision {
            Some(0) if magnitude == 0 => return Some((self.sign(negative).to_string(), false)),
            Some(p) => p.saturating_sub(digits.len()),
            None => 0,
        };

        let mut body = String::with_capacity(digits.len() + zeros + 3);
        body.push_str(self.sign(negative));
        if self.sharp {
            body.push_str(prefix);
        }
        body.extend(std::iter::repeat_n('0', zeros));
        body.push_str(&digits);
        Some((body, self.precision.is_none()))
    }

    fn float(&self, x: f64) -> Option<(String, bool)> {
        let digits = match self.verb {
            'f' | 'F' => format!("{:.*}", self.precision.unwrap_or(6), x.abs()),
            'e' | 'E' => exponent(x.abs(), self.precision.unwrap_or(6), self.verb == 'E'),
            'g' | 'G' | 'v' | 's' => match self.precision {
                Some(p) => general(x.abs(), p, self.verb == 'G'),
                None => format!("{}", x.abs()),
            },
            _ => return None,
        };
        let mut body = String::with_capacity(digits.len() + 1);
        body.push_str(self.sign(x.is_sign_negative() && !x.is_nan()));
        body.push_str(&digits);
        Some((body, x.is_finite()))
    }

    fn character(&self, c: char) -> Option<(String, bool)> {
        match self.verb {
            'c' | 'v' | 's' => Some((c.to_string(), false)),
            'q' => Some((format!("{:?}", c), false)),
            'd' => self.integer(false, c as u64),
            'x' | 'X' | 'o' | 'b' => self.integer(false, c as u64),
            _ => None,
        }
    }

    fn text(&self, s: &str) -> Option<(String, bool)> {
        let s = match self.precision {
            Some(p) => match s.char_indices().nth(p) {
                Some((idx, _)) => &s[..idx],
                None => s,
            },
            None => s,
        };
        match self.verb {
            's' | 'v' => Some((s.to_string(), false)),
            'q' => Some((format!("{:?}", s), false)),
            'x' | 'X' => {
                let mut hex = String::with_capacity(s.len() * 2);
                for byte in s.bytes() {
                    let _ = if self.verb == 'x' {
                        write!(hex, "{:02x}", byte)
                    } else {
                        write!(hex, "{:02X}", byte)
                    };
                }
                Some((hex, false))
            }
            _ => None,
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    fn pad(&self, body: &str, numeric: bool, out: &mut String) {
        let len = body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);
        if fill == 0 {
            out.push_str(body);
        } else if self.minus {
            out.push_str(body);
            out.extend(std::iter::repeat_n(' ', fill));
        } else if self.zero && numeric {
            // Zeros go between the sign/radix prefix and the digits.
            let split = prefix_len(body, self.sharp);
            out.push_str(&body[..split]);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(&body[split..]);
        } else {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(body);
        }
    }
}

/// Length of the sign and radix prefix at the front of a rendered number.
fn prefix_len(body: &str, sharp: bool) -> usize {
    let mut len = match body.as_bytes().first() {
        Some(b'-' | b'+' | b' ') => 1,
        _ => 0,
    };
    if sharp {
        let rest = &body[len..];
        if rest.starts_with("0x") || rest.starts_with("0X") || rest.starts_with("0b") {
            len += 2;
        } else if rest.starts_with('0') && rest.len() > 1 {
            len += 1;
        }
    }
    len
}

/// `1.500000e+00` style, with at least two exponent digits.
fn exponent(x: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, x);
    let Some((mantissa, exp)) = raw.split_once('e') else {
        return raw;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let e = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, e, sign, exp.unsigned_abs())
}

/// `%g` with an explicit number of significant digits.
fn general(x: f64, precision: usize, upper: bool) -> String {
    if !x.is_finite() {
        return format!("{}", x);
    }
    let precision = precision.max(1);
    let probe = format!("{:.*e}", precision - 1, x);
    let exp: i32 = probe
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let s = exponent(x, precision - 1, upper);
        let split = s.find(['e', 'E']).unwrap_or(s.len());
        let (mantissa, tail) = s.split_at(split);
        format!("{}{}", trim_fraction(mantissa), tail)
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<T: ToValue + ?Sized>(t: &T) -> Value<'_> {
        t.to_value()
    }

    #[test]
    fn test_sprintf_basic_verbs() {
        let s = sprintf("%d/%f/%s", &[v(&3), v(&1.5), v("x")]);
        assert_eq!(s, "3/1.500000/x");
    }

    #[test]
    fn test_sprintf_without_args_is_verbatim() {
        assert_eq!(sprintf("test debug", &[]), "test debug");
        assert_eq!(sprintf("100%%", &[]), "100%");
    }

    #[test]
    fn test_sprintf_width_and_flags() {
        assert_eq!(sprintf("[%5d]", &[v(&42)]), "[   42]");
        assert_eq!(sprintf("[%-5d]", &[v(&42)]), "[42   ]");
        assert_eq!(sprintf("[%05d]", &[v(&-42)]), "[-0042]");
        assert_eq!(sprintf("[%+d]", &[v(&7)]), "[+7]");
        assert_eq!(sprintf("[%6.2f]", &[v(&3.14159)]), "[  3.14]");
        assert_eq!(sprintf("[%-4s]", &[v("ab")]), "[ab  ]");
        assert_eq!(sprintf("[%.2s]", &[v("abcdef")]), "[ab]");
    }

    #[test]
    fn test_sprintf_radix() {
        assert_eq!(sprintf("%x %X %o %b", &[v(&255), v(&255), v(&8), v(&5)]), "ff FF 10 101");
        assert_eq!(sprintf("%#x", &[v(&255u32)]), "0xff");
        assert_eq!(sprintf("%#08x", &[v(&255u32)]), "0x0000ff");
        assert_eq!(sprintf("%x", &[v(&-255)]), "-ff");
        assert_eq!(sprintf("%x", &[v("hi")]), "6869");
    }

    #[test]
    fn test_sprintf_floats() {
        assert_eq!(sprintf("%e", &[v(&1234.5678)]), "1.234568e+03");
        assert_eq!(sprintf("%E", &[v(&0.00012)]), "1.200000E-04");
        assert_eq!(sprintf("%g", &[v(&1.5)]), "1.5");
        assert_eq!(sprintf("%.3g", &[v(&1.23456)]), "1.23");
        assert_eq!(sprintf("%.2g", &[v(&123456.0)]), "1.2e+05");
        assert_eq!(sprintf("%v", &[v(&2.0f32)]), "2");
        assert_eq!(sprintf("%.1f", &[v(&-0.26)]), "-0.3");
    }

    #[test]
    fn test_sprintf_other_verbs() {
        assert_eq!(sprintf("%t", &[v(&true)]), "true");
        assert_eq!(sprintf("%c", &[v(&'z')]), "z");
        assert_eq!(sprintf("%c", &[v(&65)]), "A");
        assert_eq!(sprintf("%q", &[v("a\"b")]), "\"a\\\"b\"");
        assert_eq!(sprintf("%v", &[v(&'q')]), "q");
    }

    #[test]
    fn test_sprintf_display_and_debug_values() {
        let path = std::path::Path::new("/tmp/app.log");
        let list = vec![1, 2];
        let s = sprintf(
            "open %s: %v",
            &[Value::display(&path.display()), Value::debug(&list)],
        );
        assert_eq!(s, "open /tmp/app.log: [1, 2]");
    }

    #[test]
    fn test_sprintf_reports_problems_inline() {
        assert_eq!(sprintf("%d", &[v("x")]), "%!d(string=x)");
        assert_eq!(sprintf("%d %d", &[v(&1)]), "1 %!d(MISSING)");
        assert_eq!(sprintf("tail %", &[]), "tail %!(NOVERB)");
        assert_eq!(
            sprintf("%d", &[v(&1), v(&2), v("x")]),
            "1%!(EXTRA int=2, string=x)"
        );
        assert_eq!(sprintf("%f", &[v(&3)]), "%!f(int=3)");
    }

    #[test]
    fn test_sprintf_rejects_huge_width_and_precision() {
        assert_eq!(sprintf("%99999999999999d", &[v(&1)]), "%!(BADWIDTH)1");
        assert_eq!(sprintf("[%.99999999999999f]", &[v(&1.5)]), "[%!(BADPREC)1.500000]");
        assert_eq!(sprintf("%1000001s|", &[v("x")]), "%!(BADWIDTH)x|");

        let padded = sprintf("%1000000d", &[v(&7)]);
        assert_eq!(padded.len(), 1_000_000);
        assert!(padded.ends_with(" 7"));
    }

    #[test]
    fn test_sprintf_integer_precision_is_minimum_digits() {
        assert_eq!(sprintf("[%.3d]", &[v(&7)]), "[007]");
        assert_eq!(sprintf("[%.3d]", &[v(&-7)]), "[-007]");
        assert_eq!(sprintf("[%6.3d]", &[v(&7)]), "[   007]");
        assert_eq!(sprintf("[%06.3d]", &[v(&7)]), "[   007]");
        assert_eq!(sprintf("[%.2d]", &[v(&12345)]), "[12345]");
        assert_eq!(sprintf("[%#.4x]", &[v(&255)]), "[0x00ff]");
        assert_eq!(sprintf("[%.0d]", &[v(&0)]), "[]");
    }

    #[test]
    fn test_sprint_concatenates_without_separator() {
        let s = sprint(&[v("test debug, "), v(&0), v(&1.456), v("str")]);
        assert_eq!(s, "test debug, 01.456str");
        assert_eq!(sprint(&[]), "");
    }

    #[test]
    fn test_to_value_through_references() {
        let owned = String::from("owned");
        let borrowed: &str = "borrowed";
        let nested = &&7u8;
        assert_eq!(sprint(&[v(&owned), v(&borrowed), v(nested)]), "ownedborrowed7");
        assert_eq!(format!("{:?}", v(&-3)), "int(-3)");
    }
}
