//! EDID image encoding and upload
//!
//! The built-in EDIDs are kept as hex text, 32 characters (16 bytes) per
//! line. [`encode`] turns the text into bytes and fills in the checksum of
//! the base block (byte 127) and of the CEA extension (byte 255).
//! [`write_to_device`] then copies the image into the chip's EDID RAM one
//! 16-byte block at a time.

use alloc::vec::Vec;

use crate::bus::Bus;
use crate::command::EDID_RAM;
use crate::config::EdidProfile;
use crate::interface::RegisterInterface;

/// Size of a base block plus one extension
pub const EDID_SIZE: usize = 256;

/// First register of the EDID RAM
pub const EDID_BASE_REGISTER: u16 = EDID_RAM;

/// Bytes per EDID RAM write
pub const BLOCK_SIZE: usize = 16;

/// Start offsets of the blocks whose last byte is a checksum
const CHECKSUM_BLOCKS: [usize; 2] = [7 * BLOCK_SIZE, 15 * BLOCK_SIZE];

/// Base block and CEA extension advertised with two CSI-2 data lanes
pub const TWO_LANE_EDID: &str = concat!(
    "00ffffffffffff005262888800888888",
    "1c150103800000780aEE91A3544C9926",
    "0F505400000001010101010101010101",
    "010101010101011d007251d01e206e28",
    "5500c48e2100001e8c0ad08a20e02d10",
    "103e9600138e2100001e000000fc0054", // FC: device name "Toshiba-H2C"
    "6f73686962612d4832430a20000000FD",
    "003b3d0f2e0f1e0a2020202020200100",
    // CEA extension v3, DTDs at 0x20, basic audio
    "020320424d841303021211012021223c",
    "3d3e2309070766030c00300080E3007F",
    "8c0ad08a20e02d10103e9600c48e2100", // DTD 1
    "00188c0ad08a20e02d10103e9600138e", // DTD 2
    "210000188c0aa01451f01600267c4300", // DTD 3
    "138e2100009800000000000000000000",
    "00000000000000000000000000000000",
    "00000000000000000000000000000000",
);

/// Base block and CEA extension advertised with four CSI-2 data lanes
pub const FOUR_LANE_EDID: &str = concat!(
    "00ffffffffffff005262888800888888",
    "1c150103800000780aEE91A3544C9926",
    "0F505400000001010101010101010101",
    "010101010101011d007251d01e206e28",
    "5500c48e2100001e8c0ad08a20e02d10",
    "103e9600138e2100001e000000fc0054",
    "6f73686962612d4832430a20000000FD",
    "003b3d0f2e0f1e0a2020202020200100",
    // DTDs at 0x22, two more VICs (16, 31)
    "020322424f841303021211012021223c",
    "3d3e101f2309070766030c00300080E3",
    "007F8c0ad08a20e02d10103e9600c48e",
    "210000188c0ad08a20e02d10103e9600",
    "138e210000188c0aa01451f01600267c",
    "4300138e210000980000000000000000",
    "00000000000000000000000000000000",
    "00000000000000000000000000000000",
);

/// Hex text of a built-in EDID
pub fn default_text(profile: EdidProfile) -> &'static str {
    match profile {
        EdidProfile::TwoLane => TWO_LANE_EDID,
        EdidProfile::FourLane => FOUR_LANE_EDID,
    }
}

/// Encoded, checksummed image of a built-in EDID
pub fn default_image(profile: EdidProfile) -> Vec<u8> {
    encode(default_text(profile))
}

fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Decode hex text into bytes and fill in the checksum bytes
///
/// Characters are taken pairwise; a trailing odd character is ignored and a
/// non-hex character counts as `0`. The result is `text.len() / 2` bytes.
///
/// A running 8-bit sum is decremented by every byte. At the end of a full
/// block starting at offset 112 or 240, the block's last byte is replaced by
/// the running value and the sum restarts. The replaced byte never counts
/// towards its own checksum, so each 128-byte half sums to zero.
pub fn encode(text: &str) -> Vec<u8> {
    let mut image: Vec<u8> = text
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect();

    let mut checksum: u8 = 0;
    for start in (0..image.len()).step_by(BLOCK_SIZE) {
        let end = (start + BLOCK_SIZE).min(image.len());
        let slot = start + BLOCK_SIZE - 1;
        let carries_checksum = CHECKSUM_BLOCKS.contains(&start) && end == start + BLOCK_SIZE;

        for offset in start..end {
            if carries_checksum && offset == slot {
                continue;
            }
            checksum = checksum.wrapping_sub(image[offset]);
        }

        if carries_checksum {
            image[slot] = checksum;
            checksum = 0;
        }
    }

    image
}

/// True if every 128-byte half of `image` sums to zero mod 256
pub fn half_sums_to_zero(image: &[u8]) -> bool {
    image
        .chunks(EDID_SIZE / 2)
        .all(|half| half.iter().fold(0u8, |sum, b| sum.wrapping_add(*b)) == 0)
}

/// Copy `image` into EDID RAM in 16-byte writes at `base + offset`
///
/// Blocks go out in increasing offset order. Failed writes are logged by the
/// bus and the remaining blocks are still sent.
pub fn write_to_device<I>(bus: &mut Bus<I>, image: &[u8], base: u16)
where
    I: RegisterInterface,
{
    for (index, block) in image.chunks(BLOCK_SIZE).enumerate() {
        let register = base.wrapping_add((index * BLOCK_SIZE) as u16);
        bus.write_bytes(register, block);
    }
}
