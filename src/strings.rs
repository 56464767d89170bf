// jvmti-agent/src/strings.rs
//
// String conversions for the two encodings the interface hands out.
// Names, signatures and generated-code labels arrive in modified UTF-8:
// NUL is encoded as C0 80 and supplementary characters as two three-byte
// surrogate halves, so neither CStr::to_str nor str::from_utf8 applies.
// Agent options arrive in the platform encoding instead.

use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::StringDecodeError;

#[derive(Debug)]
enum DecoderState {
    OneByte,
    TwoBytes,
    ThreeBytesOne,
    ThreeBytesTwo,
    /// After an ED lead byte; the next byte decides between an ordinary
    /// three-byte character (U+D000..U+D7FF) and a surrogate pair.
    PairOne,
    PairTwo,
    PairThree,
    PairFour,
    PairFive,
}

/// Decodes a modified UTF-8 byte string, as produced by the VM for
/// method names, signatures and the like.
pub fn decode_modified_utf8(bytes: &[u8]) -> Result<String, StringDecodeError> {
    let mut converted: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut state = DecoderState::OneByte;
    let mut accumulator: u32 = 0;
    for b in bytes.iter().copied() {
        match state {
            DecoderState::OneByte => {
                if (b & 0x80) == 0x00 {
                    converted.push(b);
                } else if (b & 0xe0) == 0xc0 {
                    state = DecoderState::TwoBytes;
                    accumulator = ((b & 0x1f) as u32) << 6;
                } else if b == 0xed {
                    state = DecoderState::PairOne;
                } else if (b & 0xf0) == 0xe0 {
                    state = DecoderState::ThreeBytesOne;
                    accumulator = ((b & 0x0f) as u32) << 12;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::TwoBytes => {
                if (b & 0xc0) == 0x80 {
                    state = DecoderState::OneByte;
                    accumulator += (b & 0x3f) as u32;
                    if accumulator == 0 {
                        // The C0 80 form of an embedded NUL.
                        converted.push(0);
                    } else if (0x80..=0x7ff).contains(&accumulator) {
                        converted.push(0xc0 | ((accumulator >> 6) & 0x1f) as u8);
                        converted.push(0x80 | (accumulator & 0x3f) as u8);
                    } else {
                        return Err(StringDecodeError::ModifiedUtf8Error);
                    }
                    accumulator = 0;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::ThreeBytesOne => {
                if (b & 0xc0) == 0x80 {
                    state = DecoderState::ThreeBytesTwo;
                    accumulator += ((b & 0x3f) as u32) << 6;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::ThreeBytesTwo => {
                if (b & 0xc0) == 0x80 {
                    state = DecoderState::OneByte;
                    accumulator += (b & 0x3f) as u32;
                    if (0x800..=0xffff).contains(&accumulator) {
                        converted.push(0xe0 | ((accumulator >> 12) & 0x0f) as u8);
                        converted.push(0x80 | ((accumulator >> 6) & 0x3f) as u8);
                        converted.push(0x80 | (accumulator & 0x3f) as u8);
                    } else {
                        return Err(StringDecodeError::ModifiedUtf8Error);
                    }
                    accumulator = 0;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::PairOne => {
                if (b & 0xf0) == 0xa0 {
                    // High surrogate payload, a supplementary character follows.
                    state = DecoderState::PairTwo;
                    accumulator = 0x10000 + (((b & 0x0f) as u32) << 16);
                } else if (b & 0xe0) == 0x80 {
                    // ED 80..9F continues an ordinary U+D000..U+D7FF character.
                    state = DecoderState::ThreeBytesTwo;
                    accumulator = (0x0d << 12) + (((b & 0x3f) as u32) << 6);
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::PairTwo => {
                if (b & 0xc0) == 0x80 {
                    state = DecoderState::PairThree;
                    accumulator += ((b & 0x3f) as u32) << 10;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::PairThree => {
                if b == 0xed {
                    state = DecoderState::PairFour;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::PairFour => {
                if (b & 0xf0) == 0xb0 {
                    state = DecoderState::PairFive;
                    accumulator += ((b & 0x0f) as u32) << 6;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
            DecoderState::PairFive => {
                if (b & 0xc0) == 0x80 {
                    state = DecoderState::OneByte;
                    accumulator += (b & 0x3f) as u32;
                    if accumulator > 0xffff {
                        converted.push(0xf0 | ((accumulator >> 18) & 0x07) as u8);
                        converted.push(0x80 | ((accumulator >> 12) & 0x3f) as u8);
                        converted.push(0x80 | ((accumulator >> 6) & 0x3f) as u8);
                        converted.push(0x80 | (accumulator & 0x3f) as u8);
                    } else {
                        return Err(StringDecodeError::ModifiedUtf8Error);
                    }
                    accumulator = 0;
                } else {
                    return Err(StringDecodeError::ModifiedUtf8Error);
                }
            }
        }
    }
    if !matches!(state, DecoderState::OneByte) {
        // Input ended inside a multi-byte sequence.
        return Err(StringDecodeError::ModifiedUtf8Error);
    }
    String::from_utf8(converted).map_err(StringDecodeError::from)
}

/// Reads a NUL-terminated modified UTF-8 string. A null pointer is `None`.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated byte string that stays
/// valid for the duration of the call.
pub unsafe fn from_modified_utf8(input: *const c_char) -> Result<Option<String>, StringDecodeError> {
    if input.is_null() {
        return Ok(None);
    }
    decode_modified_utf8(CStr::from_ptr(input).to_bytes()).map(Some)
}

// TODO Decode the active code page on Windows instead of assuming utf-8,
// see JDK-5049313 for why options are not modified utf-8.
/// Reads a NUL-terminated string in the platform encoding, as the VM
/// passes agent options. A null pointer is `None`.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated byte string that stays
/// valid for the duration of the call.
pub unsafe fn from_platform(input: *const c_char) -> Result<Option<String>, StringDecodeError> {
    if input.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(input)
        .to_str()
        .map(str::to_string)
        .map(Some)
        .map_err(StringDecodeError::from)
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::ptr;

    use super::*;

    #[test]
    fn ascii_passes_through() {
        let decoded = decode_modified_utf8(b"Ljava/lang/String;").unwrap();
        assert_eq!(decoded, "Ljava/lang/String;");
    }

    #[test]
    fn embedded_nul_uses_two_bytes() {
        let decoded = decode_modified_utf8(&[0x41, 0xc0, 0x80, 0x42]).unwrap();
        assert_eq!(decoded, "A\u{0}B");
    }

    #[test]
    fn two_byte_characters() {
        // U+00E9
        let decoded = decode_modified_utf8(&[0x72, 0xc3, 0xa9, 0x73, 0x75, 0x6d, 0xc3, 0xa9]).unwrap();
        assert_eq!(decoded, "résumé");
    }

    #[test]
    fn three_byte_characters() {
        // U+20AC
        let decoded = decode_modified_utf8(&[0xe2, 0x82, 0xac]).unwrap();
        assert_eq!(decoded, "€");
    }

    #[test]
    fn three_byte_characters_with_ed_lead() {
        // U+D000 is an ordinary character even though it shares the ED lead
        // byte with surrogate halves.
        let decoded = decode_modified_utf8(&[0xed, 0x80, 0x80]).unwrap();
        assert_eq!(decoded, "\u{d000}");
    }

    #[test]
    fn surrogate_pairs_become_one_character() {
        // U+1F600 as the six-byte ED A0 BD ED B8 80 form.
        let decoded = decode_modified_utf8(&[0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80]).unwrap();
        assert_eq!(decoded, "\u{1f600}");
    }

    #[test]
    fn lone_low_surrogate_is_rejected() {
        assert!(matches!(
            decode_modified_utf8(&[0xed, 0xb8, 0x80]),
            Err(StringDecodeError::ModifiedUtf8Error)
        ));
    }

    #[test]
    fn bare_four_byte_utf8_is_rejected() {
        // Standard UTF-8 for U+1F600; the interface never emits this form.
        assert!(matches!(
            decode_modified_utf8(&[0xf0, 0x9f, 0x98, 0x80]),
            Err(StringDecodeError::ModifiedUtf8Error)
        ));
    }

    #[test]
    fn overlong_two_byte_is_rejected() {
        // C1 81 would be an overlong 'A'.
        assert!(matches!(
            decode_modified_utf8(&[0xc1, 0x81]),
            Err(StringDecodeError::ModifiedUtf8Error)
        ));
    }

    #[test]
    fn truncated_sequence_is_rejected() {
        assert!(matches!(
            decode_modified_utf8(&[0xe2, 0x82]),
            Err(StringDecodeError::ModifiedUtf8Error)
        ));
    }

    #[test]
    fn null_pointer_is_none() {
        let decoded = unsafe { from_modified_utf8(ptr::null()) }.unwrap();
        assert_eq!(decoded, None);
        let options = unsafe { from_platform(ptr::null()) }.unwrap();
        assert_eq!(options, None);
    }

    #[test]
    fn platform_options_decode() {
        let raw = CString::new("interval=100,log=jit").unwrap();
        let options = unsafe { from_platform(raw.as_ptr()) }.unwrap();
        assert_eq!(options.as_deref(), Some("interval=100,log=jit"));
    }

    #[test]
    fn modified_utf8_pointer_roundtrip() {
        let raw = CString::new("com/example/Main").unwrap();
        let decoded = unsafe { from_modified_utf8(raw.as_ptr()) }.unwrap();
        assert_eq!(decoded.as_deref(), Some("com/example/Main"));
    }
}
