use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    errors::EdsError,
    types::{
        Curve, Point, Signature, SigningKey, VerifyingKey, SCALAR_HEX_LEN, SIGNATURE_HEX_LEN,
        VERIFYING_KEY_HEX_LEN,
    },
};

const HALF_BITS: usize = 256;

#[inline]
fn hex_fixed(v: &BigUint, width: usize) -> String {
    format!("{:0>width$}", v.to_str_radix(16))
}

fn low_half_mask() -> BigUint {
    (BigUint::from(1u8) << HALF_BITS) - 1u8
}

/// Signature line: `r * 2^256 + s` as 128 lowercase hex digits, zero padded,
/// no trailing newline.
#[must_use]
pub fn encode_signature(sig: &Signature) -> String {
    let packed = (&sig.r << HALF_BITS) + &sig.s;
    hex_fixed(&packed, SIGNATURE_HEX_LEN)
}

/// Parse the first line of a signature file and range-check `(r, s)` against
/// the subgroup order `q`.
///
/// # Errors
///
/// Returns `EdsError::MalformedSignature` if the line is empty, contains
/// anything but hex digits, is wider than 512 bits, or decodes to `r` or `s`
/// outside `(0, q)`.
pub fn decode_signature(text: &str, q: &BigUint) -> Result<Signature, EdsError> {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return Err(EdsError::MalformedSignature("empty signature"));
    }
    if line.len() > SIGNATURE_HEX_LEN {
        return Err(EdsError::MalformedSignature("longer than 512 bits"));
    }
    if !line.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EdsError::MalformedSignature("not hexadecimal"));
    }
    let packed = BigUint::parse_bytes(line.as_bytes(), 16)
        .ok_or(EdsError::MalformedSignature("not hexadecimal"))?;
    let r = &packed >> HALF_BITS;
    let s = packed & low_half_mask();
    if r.is_zero() || &r >= q {
        return Err(EdsError::MalformedSignature("r out of range"));
    }
    if s.is_zero() || &s >= q {
        return Err(EdsError::MalformedSignature("s out of range"));
    }
    Ok(Signature { r, s })
}

fn parse_fixed_hex(text: &str, width: usize) -> Result<BigUint, EdsError> {
    let text = text.trim();
    if text.len() != width {
        return Err(EdsError::InvalidLength { expected: width, got: text.len() });
    }
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EdsError::InvalidKey("not hexadecimal"));
    }
    BigUint::parse_bytes(text.as_bytes(), 16).ok_or(EdsError::InvalidKey("not hexadecimal"))
}

/// Private scalar as 64 hex digits.
#[must_use]
pub fn encode_signing_key(key: &SigningKey) -> String {
    hex_fixed(&key.d, SCALAR_HEX_LEN)
}

/// Parse and validate a 64-digit private scalar.
///
/// # Errors
///
/// Returns `EdsError::InvalidLength` for the wrong width and
/// `EdsError::InvalidKey` for non-hex input or `d` outside `[1, q)`.
pub fn decode_signing_key(text: &str, curve: &Curve) -> Result<SigningKey, EdsError> {
    let d = parse_fixed_hex(text, SCALAR_HEX_LEN)?;
    SigningKey::from_scalar(d, curve)
}

/// Public point as 128 hex digits `x || y`.
///
/// # Errors
///
/// Returns `EdsError::InvalidKey` for the point at infinity, which has no
/// affine encoding.
pub fn encode_verifying_key(key: &VerifyingKey) -> Result<String, EdsError> {
    match &key.point {
        Point::Infinity => Err(EdsError::InvalidKey("point at infinity")),
        Point::Affine { x, y } => {
            Ok(format!("{}{}", hex_fixed(x, SCALAR_HEX_LEN), hex_fixed(y, SCALAR_HEX_LEN)))
        }
    }
}

/// Parse and validate a 128-digit `x || y` public point.
///
/// # Errors
///
/// Returns `EdsError::InvalidLength` for the wrong width and
/// `EdsError::InvalidKey` for non-hex input or a point off the curve.
pub fn decode_verifying_key(text: &str, curve: &Curve) -> Result<VerifyingKey, EdsError> {
    let text = text.trim();
    if text.len() != VERIFYING_KEY_HEX_LEN || !text.is_ascii() {
        return Err(EdsError::InvalidLength { expected: VERIFYING_KEY_HEX_LEN, got: text.len() });
    }
    let (xs, ys) = text.split_at(SCALAR_HEX_LEN);
    let x = parse_fixed_hex(xs, SCALAR_HEX_LEN)?;
    let y = parse_fixed_hex(ys, SCALAR_HEX_LEN)?;
    VerifyingKey::from_point(Point::affine(x, y), curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params, types::DomainParams};

    fn q() -> BigUint {
        DomainParams::gost_r3410_2001_test().curve.q
    }

    #[test]
    fn signature_line_is_zero_padded() {
        let sig = Signature { r: BigUint::from(1u8), s: BigUint::from(0xabu8) };
        let line = encode_signature(&sig);
        assert_eq!(line.len(), SIGNATURE_HEX_LEN);
        assert_eq!(&line[..64], format!("{:0>64}", "1"));
        assert_eq!(&line[64..], format!("{:0>64}", "ab"));
        assert_eq!(decode_signature(&line, &q()).unwrap(), sig);
    }

    #[test]
    fn decode_takes_the_first_line_and_trims() {
        let sig = Signature { r: BigUint::from(7u8), s: BigUint::from(9u8) };
        let text = format!("  {}\r\nignored\n", encode_signature(&sig));
        assert_eq!(decode_signature(&text, &q()).unwrap(), sig);
        // Short lines are accepted as unpadded values.
        let short = format!("7{}", "0".repeat(63) + "9");
        assert_eq!(decode_signature(&short, &q()).unwrap(), sig);
    }

    #[test]
    fn decode_rejects_structural_garbage() {
        let q = q();
        assert_eq!(decode_signature("", &q), Err(EdsError::MalformedSignature("empty signature")));
        assert_eq!(decode_signature("\n", &q), Err(EdsError::MalformedSignature("empty signature")));
        assert_eq!(decode_signature("xyz", &q), Err(EdsError::MalformedSignature("not hexadecimal")));
        assert_eq!(decode_signature("+1", &q), Err(EdsError::MalformedSignature("not hexadecimal")));
        assert_eq!(decode_signature("1_0", &q), Err(EdsError::MalformedSignature("not hexadecimal")));
        let long = "1".repeat(SIGNATURE_HEX_LEN + 1);
        assert_eq!(decode_signature(&long, &q), Err(EdsError::MalformedSignature("longer than 512 bits")));
    }

    #[test]
    fn key_hex_roundtrip_and_validation() {
        let curve = DomainParams::gost_r3410_2001_test().curve;
        let sk = params::reference_signing_key();
        let sk_hex = encode_signing_key(&sk);
        assert_eq!(sk_hex, "7a929ade789bb9be10ed359dd39a72c11b60961f49397eee1d19ce9891ec3b28");
        assert_eq!(decode_signing_key(&sk_hex, &curve).unwrap(), sk);

        let vk = params::reference_verifying_key();
        let vk_hex = encode_verifying_key(&vk).unwrap();
        assert_eq!(decode_verifying_key(&vk_hex, &curve).unwrap(), vk);

        assert_eq!(
            decode_signing_key(&"0".repeat(SCALAR_HEX_LEN), &curve),
            Err(EdsError::InvalidKey("scalar out of range"))
        );
        assert_eq!(
            decode_signing_key("abc", &curve),
            Err(EdsError::InvalidLength { expected: SCALAR_HEX_LEN, got: 3 })
        );
        let mut off_curve = vk_hex.clone();
        off_curve.replace_range(127..128, if vk_hex.ends_with('a') { "b" } else { "a" });
        assert_eq!(
            decode_verifying_key(&off_curve, &curve),
            Err(EdsError::InvalidKey("point not on curve"))
        );
    }
}
