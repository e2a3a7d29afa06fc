use crate::codec::Message;

/// Delivery priority for a republished message.
///
/// The first character of the payload body decides: an ASCII digit maps to
/// its numeric value, anything else (including an empty body) maps to 0.
/// Deterministic and total; a stand-in for a real triage function.
pub fn message_priority(message: &Message) -> u8 {
    match message.payload.body.as_bytes().first() {
        Some(&byte) if byte.is_ascii_digit() => byte - b'0',
        _ => 0,
    }
}
