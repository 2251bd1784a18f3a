//! Labels packed into a read-only image of null-terminated strings, as they are laid out in the
//! stand's program memory.
//!
//! ```text
//! | 0x | M | O | T | O | R |   | T | Y | P | E | \0 | 1 | 2 | S | 1 | 4 | ...
//! ```
//!
//! A label is read by starting at its address and copying bytes up to and including the
//! terminator. Every decode produces its own [`DecodedLabel`], so earlier results are never
//! overwritten by later ones.

use crate::labels::LabelId;

/// Marks the end of a stored label
pub const TERMINATOR: u8 = 0;

/// Bytes in a decoded label, including the terminator. One LCD line plus one.
pub const LABEL_CAPACITY: usize = crate::lcd_screen::NUM_CHARACTERS_PER_LINE + 1;

/// Byte offset of a label within a [`LabelStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u16);

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Address {address} does not reference label storage ({size} bytes)")]
    InvalidReference { address: Address, size: usize },
    #[error("Label at {address} is not terminated within {capacity} bytes")]
    BufferOverflow { address: Address, capacity: usize },
    #[error("Label at {address} contains byte {byte:#04x}, which the display cannot show")]
    InvalidCharacter { address: Address, byte: u8 },
    #[error("Label {0:?} is not in this label store")]
    UnknownLabel(LabelId),
}

/// A label copied out of a [`LabelStore`], terminator included
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DecodedLabel {
    bytes: [u8; LABEL_CAPACITY],
    len: usize,
}

impl DecodedLabel {
    /// The visible characters
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    pub fn as_str(&self) -> &str {
        // Decoding only accepts ASCII
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Debug for DecodedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}

impl std::fmt::Display for DecodedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl PartialEq<str> for DecodedLabel {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<'a> PartialEq<&'a str> for DecodedLabel {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_str() == *other
    }
}

#[derive(Clone, Debug, Default)]
pub struct LabelStore {
    image: Vec<u8>,
    index: Vec<(LabelId, Address)>,
}

impl LabelStore {
    /// Packs every [`LabelId`] back to back, in declaration order
    pub fn builtin() -> Self {
        let mut store = Self::default();
        for &id in LabelId::ALL.iter() {
            store.push(id);
        }
        store
    }

    /// Wraps a raw image. No labels are indexed, so only [`LabelStore::decode`] is useful.
    pub fn from_image(image: Vec<u8>) -> Self {
        Self {
            image,
            index: Vec::new(),
        }
    }

    fn push(&mut self, id: LabelId) {
        #[allow(clippy::cast_possible_truncation)]
        let address = Address(self.image.len() as u16);
        self.image.extend_from_slice(id.text().as_bytes());
        self.image.push(TERMINATOR);
        self.index.push((id, address));
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn address_of(&self, id: LabelId) -> Option<Address> {
        self.index
            .iter()
            .find(|(label, _)| *label == id)
            .map(|&(_, address)| address)
    }

    pub fn labels(&self) -> impl Iterator<Item = (LabelId, Address)> + '_ {
        self.index.iter().copied()
    }

    pub fn decode_label(&self, id: LabelId) -> Result<DecodedLabel, DecodeError> {
        let address = self.address_of(id).ok_or(DecodeError::UnknownLabel(id))?;
        self.decode(address)
    }

    /// Copy the label at `address`, up to and including its terminator
    pub fn decode(&self, address: Address) -> Result<DecodedLabel, DecodeError> {
        let invalid_reference = DecodeError::InvalidReference {
            address,
            size: self.image.len(),
        };
        let overflow = DecodeError::BufferOverflow {
            address,
            capacity: LABEL_CAPACITY,
        };

        let source = self
            .image
            .get(usize::from(address.0)..)
            .filter(|source| !source.is_empty())
            .ok_or_else(|| invalid_reference.clone())?;

        let mut label = DecodedLabel {
            bytes: [TERMINATOR; LABEL_CAPACITY],
            len: 0,
        };

        for (position, &byte) in source.iter().enumerate() {
            if position == LABEL_CAPACITY {
                return Err(overflow);
            }

            if byte == TERMINATOR {
                label.len = position;
                return Ok(label);
            }

            if !byte.is_ascii() {
                return Err(DecodeError::InvalidCharacter { address, byte });
            }

            label.bytes[position] = byte;
        }

        // Ran off the end of the image without finding a terminator
        if source.len() >= LABEL_CAPACITY {
            Err(overflow)
        } else {
            Err(invalid_reference)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_labels_decode_exactly() {
        let store = LabelStore::builtin();
        for &id in LabelId::ALL.iter() {
            let label = store.decode_label(id).unwrap();
            let mut expected = id.text().as_bytes().to_vec();
            expected.push(TERMINATOR);
            assert_eq!(label.as_bytes_with_nul(), expected.as_slice());
            assert_eq!(label, id.text());
        }
    }

    #[test]
    fn builtin_image_is_packed() {
        let store = LabelStore::builtin();
        let expected_size = LabelId::ALL
            .iter()
            .map(|id| id.text().len() + 1)
            .sum::<usize>();
        assert_eq!(store.image().len(), expected_size);
        assert_eq!(store.address_of(LabelId::MotorType), Some(Address(0)));
        assert_eq!(
            store.address_of(LabelId::Motor12S14P),
            Some(Address(("MOTOR TYPE".len() + 1) as u16))
        );
    }

    #[test]
    fn rpm_label() {
        let store = LabelStore::from_image(b"RPM:\0".to_vec());
        let label = store.decode(Address(0)).unwrap();
        assert_eq!(label.as_str(), "RPM:");
        assert_eq!(label.len(), 4);
        assert_eq!(label.as_bytes_with_nul(), b"RPM:\0");
    }

    #[test]
    fn shorter_label_leaves_no_residue() {
        let store = LabelStore::builtin();
        let long = store.decode_label(LabelId::Header1).unwrap();
        let short = store.decode_label(LabelId::Rpm).unwrap();
        assert_eq!(short, "RPM:");
        assert_eq!(short.as_bytes_with_nul(), b"RPM:\0");
        assert_eq!(long, "RPM:  VOLT: KV:");
    }

    #[test]
    fn decoding_is_repeatable() {
        let store = LabelStore::builtin();
        let address = store.address_of(LabelId::ThrustSensor).unwrap();
        assert_eq!(store.decode(address), store.decode(address));
    }

    #[test]
    fn longest_label_fits() {
        let mut image = b"SIXTEEN CHARS OK".to_vec();
        image.push(TERMINATOR);
        let store = LabelStore::from_image(image);
        let label = store.decode(Address(0)).unwrap();
        assert_eq!(label.len(), LABEL_CAPACITY - 1);
        assert_eq!(label.as_bytes_with_nul().len(), LABEL_CAPACITY);
    }

    #[test]
    fn oversized_label_is_rejected() {
        let store = LabelStore::from_image(b"SEVENTEEN CHARS!!\0".to_vec());
        assert_eq!(
            store.decode(Address(0)),
            Err(DecodeError::BufferOverflow {
                address: Address(0),
                capacity: LABEL_CAPACITY,
            })
        );
    }

    #[test]
    fn unterminated_full_length_label_is_overflow() {
        let store = LabelStore::from_image(b"SEVENTEEN CHARS!!".to_vec());
        assert!(matches!(
            store.decode(Address(0)),
            Err(DecodeError::BufferOverflow { .. })
        ));
    }

    #[test]
    fn unterminated_short_label_is_invalid_reference() {
        let store = LabelStore::from_image(b"RPM".to_vec());
        assert_eq!(
            store.decode(Address(0)),
            Err(DecodeError::InvalidReference {
                address: Address(0),
                size: 3,
            })
        );
    }

    #[test]
    fn address_outside_image_is_invalid_reference() {
        let store = LabelStore::builtin();
        let size = store.image().len();
        #[allow(clippy::cast_possible_truncation)]
        let end = Address(size as u16);
        assert_eq!(
            store.decode(end),
            Err(DecodeError::InvalidReference { address: end, size })
        );
        assert!(matches!(
            store.decode(Address(u16::MAX)),
            Err(DecodeError::InvalidReference { .. })
        ));
    }

    #[test]
    fn non_ascii_is_rejected() {
        let store = LabelStore::from_image(vec![b'A', 0xE9, TERMINATOR]);
        assert_eq!(
            store.decode(Address(0)),
            Err(DecodeError::InvalidCharacter {
                address: Address(0),
                byte: 0xE9,
            })
        );
    }

    #[test]
    fn address_inside_a_label_reads_its_tail() {
        let store = LabelStore::from_image(b"THRUST:  A:\0".to_vec());
        assert_eq!(store.decode(Address(9)).unwrap(), "A:");
    }

    #[test]
    fn raw_image_has_no_named_labels() {
        let store = LabelStore::from_image(b"RPM:\0".to_vec());
        assert_eq!(
            store.decode_label(LabelId::Rpm),
            Err(DecodeError::UnknownLabel(LabelId::Rpm))
        );
    }

    #[test]
    fn decoded_labels_are_independent_values() {
        let store = LabelStore::builtin();
        let label = store.decode_label(LabelId::ModeHandheld).unwrap();
        let from_thread = std::thread::spawn(move || label.as_str().to_owned())
            .join()
            .unwrap();
        assert_eq!(from_thread, "HANDHELD");
    }
}
