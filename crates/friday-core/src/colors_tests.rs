use crate::Colors;

#[test]
fn disabled_palette_is_all_empty() {
    let c = Colors::new(false);
    assert!(!c.is_enabled());
    for field in [c.mnemonic, c.operand, c.machine, c.fault, c.reset] {
        assert_eq!(field, "");
    }
}

#[test]
fn enabled_palette_escapes_every_role() {
    let c = Colors::new(true);
    assert!(c.is_enabled());
    for field in [c.mnemonic, c.operand, c.machine, c.fault, c.reset] {
        assert!(field.starts_with("\x1b["), "{field:?}");
    }
    assert_ne!(c.mnemonic, c.operand);
    assert_ne!(c.fault, c.machine);
}

#[test]
fn default_is_off() {
    assert!(!Colors::default().is_enabled());
}
