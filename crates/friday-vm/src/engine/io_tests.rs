use std::io::Cursor;

use super::{BufferIo, IoPort, StreamIo, format_g};

#[test]
fn format_g_fixed_range() {
    assert_eq!(format_g(0.0), "0");
    assert_eq!(format_g(7.0), "7");
    assert_eq!(format_g(-2.5), "-2.5");
    assert_eq!(format_g(0.1), "0.1");
    assert_eq!(format_g(3.14159265), "3.14159");
    assert_eq!(format_g(100000.0), "100000");
    assert_eq!(format_g(0.0001), "0.0001");
}

#[test]
fn format_g_exponent_range() {
    assert_eq!(format_g(1e6), "1e+06");
    assert_eq!(format_g(1234567.0), "1.23457e+06");
    assert_eq!(format_g(0.00001), "1e-05");
    assert_eq!(format_g(-2.5e-7), "-2.5e-07");
    assert_eq!(format_g(3.0e38), "3e+38");
}

#[test]
fn format_g_rounding_carries_into_exponent() {
    assert_eq!(format_g(999999.7), "1e+06");
}

#[test]
fn format_g_special_values() {
    assert_eq!(format_g(f32::INFINITY), "inf");
    assert_eq!(format_g(f32::NEG_INFINITY), "-inf");
    assert_eq!(format_g(f32::NAN), "nan");
    assert_eq!(format_g(-0.0), "-0");
}

#[test]
fn buffer_reads_tokens_in_order() {
    let mut io = BufferIo::new("  12\n-3  x 1.5 ");

    assert_eq!(io.read_int(), 12);
    assert_eq!(io.read_int(), -3);
    assert_eq!(io.read_int(), 0);
    assert_eq!(io.read_float(), 1.5);
    assert_eq!(io.read_float(), 0.0);
}

#[test]
fn buffer_collects_output_lines() {
    let mut io = BufferIo::default();
    io.write_int(-4).unwrap();
    io.write_float(0.5).unwrap();

    assert_eq!(io.output(), "-4\n0.5\n");
}

#[test]
fn stream_reads_across_lines() {
    let input = Cursor::new("1 2\n\n  3\t4.25");
    let mut io = StreamIo::new(input, Vec::new());

    assert_eq!(io.read_int(), 1);
    assert_eq!(io.read_int(), 2);
    assert_eq!(io.read_int(), 3);
    assert_eq!(io.read_float(), 4.25);
    assert_eq!(io.read_int(), 0);
}

#[test]
fn stream_writes_lines() {
    let mut io = StreamIo::new(Cursor::new(""), Vec::new());
    io.write_int(42).unwrap();
    io.write_float(1e10).unwrap();

    assert_eq!(io.into_output(), b"42\n1e+10\n");
}
