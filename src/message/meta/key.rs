/// Key names indexed by `sharps + 7` for major keys and `sharps + 10` for minor.
const KEY_NAMES: [&str; 18] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#",
    "A#",
];

/// Rendered in place of a key name when a key-signature event is out of range
pub const INVALID_KEY: &str = "Err";

/// Render a key-signature event (`sf`, `mi`) as text.
///
/// `sharps` counts sharps when positive and flats when negative. `minor` is 0
/// for a major key and 1 for a minor key. Any other value renders
/// [`INVALID_KEY`].
pub fn key_signature_name(sharps: i8, minor: u8) -> String {
    if !(-7..=7).contains(&sharps) {
        return INVALID_KEY.to_owned();
    }
    let (offset, suffix) = match minor {
        0 => (7, "M"),
        1 => (10, "m"),
        _ => return INVALID_KEY.to_owned(),
    };
    let index = (i16::from(sharps) + offset) as usize;
    format!("{}{}", KEY_NAMES[index], suffix)
}

#[test]
fn renders_major_and_minor_keys() {
    assert_eq!(key_signature_name(0, 0), "CM");
    assert_eq!(key_signature_name(0, 1), "Am");
    assert_eq!(key_signature_name(-7, 0), "CbM");
    assert_eq!(key_signature_name(7, 1), "A#m");
    assert_eq!(key_signature_name(2, 0), "DM");
    assert_eq!(key_signature_name(-3, 1), "Cm");
}

#[test]
fn out_of_range_renders_placeholder() {
    assert_eq!(key_signature_name(8, 0), INVALID_KEY);
    assert_eq!(key_signature_name(-8, 1), INVALID_KEY);
    assert_eq!(key_signature_name(1, 2), INVALID_KEY);
}
