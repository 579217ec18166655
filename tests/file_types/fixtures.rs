//! Synthetic resources and game folders shared by the tests

use std::{fs, path::Path};

use agi_rs::agi_types::file::{Location, compression::lzw};

/// Canonical cel drawn for loop 0: a red and blue row over a single cyan pixel.
pub(crate) const CEL: [u8; 8] = [3, 2, 0x80, 0x41, 0x12, 0x00, 0x31, 0x00];

/// Nibble packed picture stored in version 3 games.
pub(crate) const PACKED_PICTURE: [u8; 12] = [0xF0, 0x6F, 0x81, 0x24, 0x5F, 0x07, 0xF2, 0x5F, 0x81, 0x46, 0x7F, 0xF0];

/// [`PACKED_PICTURE`] once unpacked.
pub(crate) const PICTURE: [u8; 13] = [0xF0, 0x06, 0xF8, 0x12, 0x45, 0xF0, 0x07, 0xF2, 0x05, 0xF8, 0x14, 0x67, 0xFF];

/// Description stored in [`view_bytes`].
pub(crate) const DESCRIPTION: &str = "A small test sprite";

/// A view with two loops sharing [`CEL`]; the second loop shows it mirrored.
pub(crate) fn view_bytes() -> Vec<u8> {
	// header + 2 loop offsets
	let mut data = vec![0x01, 0x01, 0x02, 0x00, 0x00, 0x09, 0x00, 0x14, 0x00];

	// loop 0 at 9: one cel at +3
	data.extend_from_slice(&[0x01, 0x03, 0x00]);
	data.extend_from_slice(&CEL);
	// loop 1 at 20: one cel at +3
	data.extend_from_slice(&[0x01, 0x03, 0x00]);
	data.extend_from_slice(&CEL);

	let offset = data.len() as u16;
	data[3..5].copy_from_slice(&offset.to_le_bytes());
	data.extend_from_slice(DESCRIPTION.as_bytes());
	data.push(0);
	data
}

/// Wraps `payload` in a version 2 volume entry.
pub(crate) fn v2_entry(volume: u8, payload: &[u8]) -> Vec<u8> {
	let mut data = vec![0x12, 0x34, volume];
	data.extend_from_slice(&(payload.len() as u16).to_le_bytes());
	data.extend_from_slice(payload);
	data
}

/// Wraps `payload` in a version 3 volume entry claiming `uncompressed` bytes.
pub(crate) fn v3_entry(volume: u8, payload: &[u8], uncompressed: usize) -> Vec<u8> {
	let mut data = vec![0x12, 0x34, volume];
	data.extend_from_slice(&(uncompressed as u16).to_le_bytes());
	data.extend_from_slice(&(payload.len() as u16).to_le_bytes());
	data.extend_from_slice(payload);
	data
}

/// Encodes directory records; `None` slots are written absent.
pub(crate) fn directory_bytes(slots: &[Option<Location>]) -> Vec<u8> {
	slots
		.iter()
		.flat_map(|slot| slot.map_or([0xFF; 3], Location::to_record))
		.collect()
}

/// Writes a version 2 game:
///
/// - logic 0 in `VOL.0` at 0
/// - view 1 in `VOL.0` after logic 0
/// - view 2 in `VOL.1` at 0
/// - view 3 in the missing `VOL.2`
pub(crate) fn write_v2_game(root: &Path, lowercase: bool) {
	let name = |n: &str| {
		if lowercase {
			n.to_lowercase()
		} else {
			n.to_string()
		}
	};

	let logic = v2_entry(0, &[1, 2, 3]);
	let view_offset = logic.len() as u32;
	let mut vol0 = logic;
	vol0.extend(v2_entry(0, &view_bytes()));
	let vol1 = v2_entry(1, &view_bytes());

	fs::write(root.join(name("VOL.0")), vol0).unwrap();
	fs::write(root.join(name("VOL.1")), vol1).unwrap();
	fs::write(root.join(name("LOGDIR")), directory_bytes(&[Some(Location::new(0, 0))])).unwrap();
	fs::write(root.join(name("PICDIR")), b"").unwrap();
	fs::write(root.join(name("SNDDIR")), b"").unwrap();
	fs::write(
		root.join(name("VIEWDIR")),
		directory_bytes(&[
			None,
			Some(Location::new(0, view_offset)),
			Some(Location::new(1, 0)),
			Some(Location::new(2, 0)),
		]),
	)
	.unwrap();
}

/// Writes a version 3 game with identifier `id`:
///
/// - view 0 stored plainly in `<ID>VOL.0` at 0
/// - view 1 LZW compressed after it
/// - picture 0 nibble packed after view 1
/// - view 2 claiming more bytes than its LZW stream holds
pub(crate) fn write_v3_game(root: &Path, id: &str) {
	let view = view_bytes();
	let mut vol0 = v3_entry(0, &view, view.len());
	let lzw_offset = vol0.len() as u32;
	vol0.extend(v3_entry(0, &lzw::compress(&view), view.len()));
	let picture_offset = vol0.len() as u32;
	vol0.extend(v3_entry(0x80, &PACKED_PICTURE, PICTURE.len()));
	let short_offset = vol0.len() as u32;
	vol0.extend(v3_entry(0, &lzw::compress(&view[..8]), view.len()));

	let logic = directory_bytes(&[None]);
	let picture = directory_bytes(&[Some(Location::new(0, picture_offset))]);
	let view = directory_bytes(&[
		Some(Location::new(0, 0)),
		Some(Location::new(0, lzw_offset)),
		Some(Location::new(0, short_offset)),
	]);
	let sound = directory_bytes(&[None]);

	// header order: logic, picture, view, sound
	let mut dir = Vec::new();
	let mut offset = 8u16;
	for part in [&logic, &picture, &view, &sound] {
		dir.extend_from_slice(&offset.to_le_bytes());
		offset += part.len() as u16;
	}
	for part in [logic, picture, view, sound] {
		dir.extend(part);
	}

	fs::write(root.join(format!("{}DIR", id)), dir).unwrap();
	fs::write(root.join(format!("{}VOL.0", id)), vol0).unwrap();
}
