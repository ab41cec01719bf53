use crate::error::DrbgError;
use zeroize::Zeroizing;

/// NIST prime curves with the SP 800-90A Appendix A.1 point pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    /// Smallest curve that meets `security_strength`.
    pub fn for_security_strength(security_strength: u32) -> Option<Self> {
        match security_strength {
            0..=128 => Some(Curve::P256),
            129..=192 => Some(Curve::P384),
            193..=256 => Some(Curve::P521),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    pub fn security_strength(self) -> u32 {
        match self {
            Curve::P256 => 128,
            Curve::P384 => 192,
            Curve::P521 => 256,
        }
    }

    /// Seed length in bits.
    pub fn seed_len(self) -> usize {
        match self {
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }

    /// Bytes emitted per block.
    pub fn out_len(self) -> usize {
        match self {
            Curve::P256 => 30,
            Curve::P384 => 46,
            Curve::P521 => 63,
        }
    }

    /// Encoded field element length in bytes.
    pub fn field_len(self) -> usize {
        self.seed_len().div_ceil(8)
    }

    /// x(k * P), with `k` given as `field_len` big-endian bytes.
    pub(crate) fn x_of_p(self, k: &[u8]) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
        match self {
            Curve::P256 => p256_ops::x_of_multiple(k, None),
            Curve::P384 => p384_ops::x_of_multiple(k, None),
            Curve::P521 => p521_ops::x_of_multiple(k, None),
        }
    }

    /// x(k * Q).
    pub(crate) fn x_of_q(self, k: &[u8]) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
        match self {
            Curve::P256 => p256_ops::x_of_multiple(k, Some((&P256_QX[..], &P256_QY[..]))),
            Curve::P384 => p384_ops::x_of_multiple(k, Some((&P384_QX[..], &P384_QY[..]))),
            Curve::P521 => p521_ops::x_of_multiple(k, Some((&P521_QX[..], &P521_QY[..]))),
        }
    }
}

/// `k mod n` for `k < 2n`, both big-endian of equal length.
fn reduce(k: &mut [u8], n: &[u8]) {
    if &*k < n {
        return;
    }
    let mut borrow = 0i16;
    for (byte, &m) in k.iter_mut().zip(n).rev() {
        let diff = *byte as i16 - m as i16 - borrow;
        borrow = (diff < 0) as i16;
        *byte = diff.rem_euclid(256) as u8;
    }
}

macro_rules! curve_ops {
    ($module:ident, $krate:ident, $n:ident) => {
        mod $module {
            use super::*;
            use $krate::{
                AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar,
                elliptic_curve::{
                    PrimeField,
                    sec1::{FromEncodedPoint, ToEncodedPoint},
                },
            };

            pub(super) fn x_of_multiple(
                k: &[u8],
                base: Option<(&[u8], &[u8])>,
            ) -> Result<Zeroizing<Vec<u8>>, DrbgError> {
                let base = match base {
                    None => ProjectivePoint::GENERATOR,
                    Some((x, y)) => {
                        let encoded = EncodedPoint::from_affine_coordinates(
                            &FieldBytes::clone_from_slice(x),
                            &FieldBytes::clone_from_slice(y),
                            false,
                        );
                        let point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(
                            &encoded,
                        ))
                        .ok_or(DrbgError::MechanismFault("Q is not a point on the curve"))?;
                        ProjectivePoint::from(point)
                    }
                };

                let mut repr = Zeroizing::new(k.to_vec());
                reduce(&mut repr, &$n);
                let scalar =
                    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(&repr)))
                        .ok_or(DrbgError::MechanismFault("scalar out of range"))?;

                let product = AffinePoint::from(base * scalar).to_encoded_point(false);
                let x = product
                    .x()
                    .ok_or(DrbgError::MechanismFault("scalar multiple is the point at infinity"))?;
                Ok(Zeroizing::new(x.to_vec()))
            }
        }
    };
}

curve_ops!(p256_ops, p256, P256_N);
curve_ops!(p384_ops, p384, P384_N);
curve_ops!(p521_ops, p521, P521_N);

const P256_QX: [u8; 32] = [
    0xc9, 0x74, 0x45, 0xf4, 0x5c, 0xde, 0xf9, 0xf0, 0xd3, 0xe0, 0x5e, 0x1e,
    0x58, 0x5f, 0xc2, 0x97, 0x23, 0x5b, 0x82, 0xb5, 0xbe, 0x8f, 0xf3, 0xef,
    0xca, 0x67, 0xc5, 0x98, 0x52, 0x01, 0x81, 0x92,
];
const P256_QY: [u8; 32] = [
    0xb2, 0x8e, 0xf5, 0x57, 0xba, 0x31, 0xdf, 0xcb, 0xdd, 0x21, 0xac, 0x46,
    0xe2, 0xa9, 0x1e, 0x3c, 0x30, 0x4f, 0x44, 0xcb, 0x87, 0x05, 0x8a, 0xda,
    0x2c, 0xb8, 0x15, 0x15, 0x1e, 0x61, 0x00, 0x46,
];
const P256_N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84,
    0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
];

const P384_QX: [u8; 48] = [
    0x8e, 0x72, 0x2d, 0xe3, 0x12, 0x5b, 0xdd, 0xb0, 0x55, 0x80, 0x16, 0x4b,
    0xfe, 0x20, 0xb8, 0xb4, 0x32, 0x21, 0x6a, 0x62, 0x92, 0x6c, 0x57, 0x50,
    0x2c, 0xee, 0xde, 0x31, 0xc4, 0x78, 0x16, 0xed, 0xd1, 0xe8, 0x97, 0x69,
    0x12, 0x41, 0x79, 0xd0, 0xb6, 0x95, 0x10, 0x64, 0x28, 0x81, 0x50, 0x65,
];
const P384_QY: [u8; 48] = [
    0x02, 0x3b, 0x16, 0x60, 0xdd, 0x70, 0x1d, 0x08, 0x39, 0xfd, 0x45, 0xee,
    0xc3, 0x6f, 0x9e, 0xe7, 0xb3, 0x2e, 0x13, 0xb3, 0x15, 0xdc, 0x02, 0x61,
    0x0a, 0xa1, 0xb6, 0x36, 0xe3, 0x46, 0xdf, 0x67, 0x1f, 0x79, 0x0f, 0x84,
    0xc5, 0xe0, 0x9b, 0x05, 0x67, 0x4d, 0xbb, 0x7e, 0x45, 0xc8, 0x03, 0xdd,
];
const P384_N: [u8; 48] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xc7, 0x63, 0x4d, 0x81, 0xf4, 0x37, 0x2d, 0xdf, 0x58, 0x1a, 0x0d, 0xb2,
    0x48, 0xb0, 0xa7, 0x7a, 0xec, 0xec, 0x19, 0x6a, 0xcc, 0xc5, 0x29, 0x73,
];

const P521_QX: [u8; 66] = [
    0x01, 0xb9, 0xfa, 0x3e, 0x51, 0x8d, 0x68, 0x3c, 0x6b, 0x65, 0x76, 0x36,
    0x94, 0xac, 0x8e, 0xfb, 0xae, 0xc6, 0xfa, 0xb4, 0x4f, 0x22, 0x76, 0x17,
    0x1a, 0x42, 0x72, 0x65, 0x07, 0xdd, 0x08, 0xad, 0xd4, 0xc3, 0xb3, 0xf4,
    0xc1, 0xeb, 0xc5, 0xb1, 0x22, 0x2d, 0xdb, 0xa0, 0x77, 0xf7, 0x22, 0x94,
    0x3b, 0x24, 0xc3, 0xed, 0xfa, 0x0f, 0x85, 0xfe, 0x24, 0xd0, 0xc8, 0xc0,
    0x15, 0x91, 0xf0, 0xbe, 0x6f, 0x63,
];
const P521_QY: [u8; 66] = [
    0x01, 0xf3, 0xbd, 0xba, 0x58, 0x52, 0x95, 0xd9, 0xa1, 0x11, 0x0d, 0x1d,
    0xf1, 0xf9, 0x43, 0x0e, 0xf8, 0x44, 0x2c, 0x50, 0x18, 0x97, 0x6f, 0xf3,
    0x43, 0x7e, 0xf9, 0x1b, 0x81, 0xdc, 0x0b, 0x81, 0x32, 0xc8, 0xd5, 0xc3,
    0x9c, 0x32, 0xd0, 0xe0, 0x04, 0xa3, 0x09, 0x2b, 0x7d, 0x32, 0x7c, 0x0e,
    0x7a, 0x4d, 0x26, 0xd2, 0xc7, 0xb6, 0x9b, 0x58, 0xf9, 0x06, 0x66, 0x52,
    0x91, 0x1e, 0x45, 0x77, 0x79, 0xde,
];
const P521_N: [u8; 66] = [
    0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfa, 0x51, 0x86,
    0x87, 0x83, 0xbf, 0x2f, 0x96, 0x6b, 0x7f, 0xcc, 0x01, 0x48, 0xf7, 0x09,
    0xa5, 0xd0, 0x3b, 0xb5, 0xc9, 0xb8, 0x89, 0x9c, 0x47, 0xae, 0xbb, 0x6f,
    0xb7, 0x1e, 0x91, 0x38, 0x64, 0x09,
];
