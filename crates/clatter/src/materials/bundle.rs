//! Runtime parser for the embedded material bundle.
//!
//! The encoder lives in `build/material_tables.rs` and never executes at
//! runtime; this module only reads the bytes it produced. The header
//! carries *two* counts (impact, scrape) rather than one, because a
//! single count cannot size two independent variable-length sections
//! ahead of the fixed-size trailing density table — see `DESIGN.md`.

use super::data::{ImpactMaterialData, Mode, ScrapeMaterialData};
use super::kinds::NUM_SIZE_BUCKETS;
use crate::error::{Error, Result};

const MAGIC: &[u8; 4] = b"CLAT";

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or_else(|| corrupt("length overflow"))?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| corrupt("unexpected end of bundle"))?;
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into().unwrap()))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take(8)?.try_into().unwrap()))
    }
}

fn corrupt(msg: impl Into<String>) -> Error {
    Error::BundleCorrupt(msg.into())
}

/// A parsed index into the embedded bundle: enough to parse any single
/// material's entry on demand without re-walking the whole blob.
pub struct Bundle {
    bytes: &'static [u8],
    impact_offsets: Vec<usize>,
    scrape_offsets: Vec<usize>,
    density_table_offset: usize,
    num_unsized: usize,
}

impl Bundle {
    pub fn parse(bytes: &'static [u8]) -> Result<Self> {
        let mut cur = Cursor::new(bytes);

        let magic = cur.take(4)?;
        if magic != MAGIC {
            return Err(corrupt("bad magic"));
        }
        let _version = cur.u32()?;
        let impact_count = cur.u32()? as usize;
        let scrape_count = cur.u32()? as usize;

        let mut impact_offsets = Vec::with_capacity(impact_count);
        for _ in 0..impact_count {
            impact_offsets.push(cur.pos);
            let _material_id = cur.u16()?;
            let num_modes = cur.u16()? as usize;
            let _cf = cur.f64()?;
            for _ in 0..num_modes {
                let _freq = cur.f64()?;
                let _power = cur.f64()?;
                let _decay = cur.f64()?;
            }
        }

        let mut scrape_offsets = Vec::with_capacity(scrape_count);
        for _ in 0..scrape_count {
            scrape_offsets.push(cur.pos);
            let _id = cur.u16()?;
            let dsdx_len = cur.u32()? as usize;
            let _exponent = cur.f64()?;
            for _ in 0..dsdx_len {
                let _sample = cur.f64()?;
            }
        }

        let density_table_offset = cur.pos;
        let num_unsized = impact_count / NUM_SIZE_BUCKETS;
        let remaining = bytes.len().saturating_sub(density_table_offset);
        if remaining != num_unsized * 8 {
            return Err(corrupt("density table length mismatch"));
        }

        Ok(Bundle {
            bytes,
            impact_offsets,
            scrape_offsets,
            density_table_offset,
            num_unsized,
        })
    }

    fn density_for_unsized(&self, unsized_index: usize) -> Result<f64> {
        if unsized_index >= self.num_unsized {
            return Err(corrupt("density index out of range"));
        }
        let offset = self.density_table_offset + unsized_index * 8;
        let mut cur = Cursor::new(&self.bytes[offset..offset + 8]);
        cur.f64()
    }

    pub fn parse_impact(&self, material_id: u16) -> Result<ImpactMaterialData> {
        let offset = *self
            .impact_offsets
            .get(material_id as usize)
            .ok_or_else(|| corrupt("impact material id out of range"))?;
        let mut cur = Cursor::new(&self.bytes[offset..]);

        let stored_id = cur.u16()?;
        if stored_id != material_id {
            return Err(corrupt("impact material id mismatch"));
        }
        let num_modes = cur.u16()? as usize;
        let cf = cur.f64()?;

        let mut modes = Vec::with_capacity(num_modes);
        for _ in 0..num_modes {
            let frequency_hz = cur.f64()?;
            let power_db = cur.f64()?;
            let decay_ms = cur.f64()?;
            let mode = Mode { frequency_hz, power_db, decay_ms };
            if !mode.is_valid() {
                return Err(corrupt("invalid mode in bundle"));
            }
            modes.push(mode);
        }

        let unsized_index = material_id as usize / NUM_SIZE_BUCKETS;
        let density = self.density_for_unsized(unsized_index)?;

        Ok(ImpactMaterialData { cf, modes, density })
    }

    pub fn parse_scrape(&self, scrape_id: u16) -> Result<ScrapeMaterialData> {
        let offset = *self
            .scrape_offsets
            .get(scrape_id as usize)
            .ok_or_else(|| corrupt("scrape material id out of range"))?;
        let mut cur = Cursor::new(&self.bytes[offset..]);

        let stored_id = cur.u16()?;
        if stored_id != scrape_id {
            return Err(corrupt("scrape material id mismatch"));
        }
        let dsdx_len = cur.u32()? as usize;
        let roughness_ratio_exponent = cur.f64()?;

        let mut dsdx = Vec::with_capacity(dsdx_len);
        for _ in 0..dsdx_len {
            dsdx.push(cur.f64()?);
        }

        Ok(ScrapeMaterialData { dsdx, roughness_ratio_exponent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_bundle() -> Vec<u8> {
        // One unsized material (one impact entry per size bucket), one
        // scrape material, matching the real generator's layout.
        let num_unsized = 1usize;
        let impact_count = num_unsized * NUM_SIZE_BUCKETS;
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&(impact_count as u32).to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());

        for id in 0..impact_count {
            out.extend_from_slice(&(id as u16).to_le_bytes());
            out.extend_from_slice(&2u16.to_le_bytes());
            out.extend_from_slice(&0.8f64.to_le_bytes());
            for m in 0..2 {
                out.extend_from_slice(&(100.0 * (m + 1) as f64).to_le_bytes());
                out.extend_from_slice(&(-6.0f64).to_le_bytes());
                out.extend_from_slice(&(200.0f64).to_le_bytes());
            }
        }

        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&3u32.to_le_bytes());
        out.extend_from_slice(&0.5f64.to_le_bytes());
        for v in [0.1f64, -0.2, 0.3] {
            out.extend_from_slice(&v.to_le_bytes());
        }

        out.extend_from_slice(&2500.0f64.to_le_bytes());
        out
    }

    #[test]
    fn parses_well_formed_bundle() {
        let bytes: &'static [u8] = Box::leak(make_test_bundle().into_boxed_slice());
        let bundle = Bundle::parse(bytes).unwrap();

        let impact = bundle.parse_impact(0).unwrap();
        assert_eq!(impact.modes.len(), 2);
        assert_eq!(impact.density, 2500.0);
        assert_eq!(impact.cf, 0.8);

        let scrape = bundle.parse_scrape(0).unwrap();
        assert_eq!(scrape.dsdx, vec![0.1, -0.2, 0.3]);
        assert_eq!(scrape.roughness_ratio_exponent, 0.5);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = make_test_bundle();
        bytes[0] = b'X';
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        assert!(matches!(Bundle::parse(bytes), Err(Error::BundleCorrupt(_))));
    }

    #[test]
    fn rejects_truncated_bundle() {
        let mut bytes = make_test_bundle();
        bytes.truncate(bytes.len() - 4);
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        assert!(Bundle::parse(bytes).is_err());
    }
}
