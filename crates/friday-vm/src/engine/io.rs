//! Console port used by `in`, `in_f`, `out` and `outf`.
//!
//! Input is a stream of whitespace-separated tokens. A token that does not
//! parse, or the end of input, reads as zero. Each written value goes on
//! its own line; floats use C `%g` formatting.

use std::io::{self, BufRead, Write};

pub trait IoPort {
    fn read_int(&mut self) -> i32;
    fn read_float(&mut self) -> f32;
    fn write_int(&mut self, value: i32) -> io::Result<()>;
    fn write_float(&mut self, value: f32) -> io::Result<()>;
}

/// Port over any buffered reader and writer.
pub struct StreamIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next whitespace-separated token, or `None` at end of input.
    fn next_token(&mut self) -> Option<String> {
        let mut token = Vec::new();
        loop {
            let available = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            };
            if available.is_empty() {
                break;
            }

            let mut used = 0;
            let mut done = false;
            for &byte in available {
                used += 1;
                if byte.is_ascii_whitespace() {
                    if !token.is_empty() {
                        done = true;
                        break;
                    }
                } else {
                    token.push(byte);
                }
            }
            self.input.consume(used);
            if done {
                break;
            }
        }

        if token.is_empty() {
            return None;
        }
        String::from_utf8(token).ok()
    }
}

impl StreamIo<io::StdinLock<'static>, io::Stdout> {
    /// Port on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> IoPort for StreamIo<R, W> {
    fn read_int(&mut self) -> i32 {
        self.next_token()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }

    fn read_float(&mut self) -> f32 {
        self.next_token()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.0)
    }

    fn write_int(&mut self, value: i32) -> io::Result<()> {
        writeln!(self.output, "{value}")
    }

    fn write_float(&mut self, value: f32) -> io::Result<()> {
        writeln!(self.output, "{}", format_g(value))
    }
}

/// In-memory port: scripted input, captured output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferIo {
    input: Vec<String>,
    next: usize,
    output: String,
}

impl BufferIo {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.split_whitespace().map(str::to_owned).collect(),
            next: 0,
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    fn next_token(&mut self) -> Option<&str> {
        let token = self.input.get(self.next)?;
        self.next += 1;
        Some(token)
    }
}

impl IoPort for BufferIo {
    fn read_int(&mut self) -> i32 {
        self.next_token()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }

    fn read_float(&mut self) -> f32 {
        self.next_token()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.0)
    }

    fn write_int(&mut self, value: i32) -> io::Result<()> {
        self.output.push_str(&value.to_string());
        self.output.push('\n');
        Ok(())
    }

    fn write_float(&mut self, value: f32) -> io::Result<()> {
        self.output.push_str(&format_g(value));
        self.output.push('\n');
        Ok(())
    }
}

/// Format like C's `%g`: six significant digits, trailing zeros removed,
/// exponent form when the decimal exponent is below -4 or at least 6.
pub fn format_g(value: f32) -> String {
    const PRECISION: i32 = 6;

    let value = f64::from(value);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_nan() {
        return format!("{sign}nan");
    }
    if value.is_infinite() {
        return format!("{sign}inf");
    }
    if value == 0.0 {
        return format!("{sign}0");
    }

    // Rounding to the target precision can carry into the exponent, so take
    // the exponent from the rounded scientific form.
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(number: &str) -> &str {
    if !number.contains('.') {
        return number;
    }
    number.trim_end_matches('0').trim_end_matches('.')
}
