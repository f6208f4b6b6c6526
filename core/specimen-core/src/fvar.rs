//! Named-instance decoding for variable fonts.
//!
//! Axis records are skipped entirely: the database only needs to know which
//! name-ids label each named instance and where the instance sits in design
//! space.

use read_fonts::FontData;

use crate::error::{FontDbError, Result};
use crate::sfnt::FVAR;

/// One predefined point in the font's design space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInstance {
    pub subfamily_name_id: u16,
    pub postscript_name_id: Option<u16>,
    /// Raw 16.16 values, one per axis.
    pub coordinates: Vec<i32>,
}

/// Decoded `fvar` instances, ordinal = position in `instances`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceTable {
    pub axis_count: u16,
    pub instances: Vec<NamedInstance>,
}

impl InstanceTable {
    /// Decode the raw `fvar` bytes. An empty slice or an unsupported version
    /// yields an empty table; truncation is an error.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::default());
        }

        let fvar = FontData::new(data);
        let read16 = |offset: usize| fvar.read_at::<u16>(offset);
        let header = |offset: usize| read16(offset).map_err(FontDbError::parse("fvar header"));

        let major = header(0)?;
        let minor = header(2)?;
        if (major, minor) != (1, 0) {
            let unsupported = FontDbError::UnsupportedVersion {
                table: FVAR,
                major,
                minor,
            };
            log::debug!("{unsupported}; ignoring named instances");
            return Ok(Self::default());
        }

        // 6..8 is reserved
        let axes_offset = header(4)?;
        let axis_count = header(8)?;
        let axis_size = header(10)?;
        let instance_count = header(12)?;
        let instance_size = header(14)?;

        let tuple_len = axis_count as usize * 4;
        let has_postscript = instance_size as usize == tuple_len + 6;
        let mut base = axes_offset as usize + axis_count as usize * axis_size as usize;

        let mut instances = Vec::with_capacity(instance_count as usize);
        for _ in 0..instance_count {
            let subfamily_name_id = read16(base).map_err(FontDbError::parse("fvar instance"))?;
            let coordinates = (0..axis_count as usize)
                .map(|axis| fvar.read_at::<i32>(base + 4 + axis * 4))
                .collect::<Result<Vec<_>, _>>()
                .map_err(FontDbError::parse("fvar instance coordinates"))?;
            let postscript_name_id = if has_postscript {
                Some(
                    read16(base + 4 + tuple_len)
                        .map_err(FontDbError::parse("fvar instance"))?,
                )
            } else {
                None
            };

            instances.push(NamedInstance {
                subfamily_name_id,
                postscript_name_id,
                coordinates,
            });
            base += instance_size as usize;
        }

        Ok(Self {
            axis_count,
            instances,
        })
    }

    /// Ordinals of the instances whose subfamily name uses `name_id`.
    pub fn subfamily_ordinals(&self, name_id: u16) -> impl Iterator<Item = usize> + '_ {
        self.instances
            .iter()
            .enumerate()
            .filter(move |(_, inst)| inst.subfamily_name_id == name_id)
            .map(|(ordinal, _)| ordinal)
    }

    /// Ordinals of the instances whose PostScript name uses `name_id`.
    pub fn postscript_ordinals(&self, name_id: u16) -> impl Iterator<Item = usize> + '_ {
        self.instances
            .iter()
            .enumerate()
            .filter(move |(_, inst)| inst.postscript_name_id == Some(name_id))
            .map(|(ordinal, _)| ordinal)
    }

    /// True when some instance refers to `name_id`.
    pub fn names_instance(&self, name_id: u16) -> bool {
        self.instances.iter().any(|inst| {
            inst.subfamily_name_id == name_id || inst.postscript_name_id == Some(name_id)
        })
    }

    /// Coordinates of every instance, index-aligned to ordinals.
    pub fn tuples(&self) -> Vec<Vec<i32>> {
        self.instances
            .iter()
            .map(|inst| inst.coordinates.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{fvar_table, Instance};

    fn instance(subfamily: u16, coords: &[i32], ps: Option<u16>) -> Instance {
        Instance {
            subfamily_name_id: subfamily,
            coords: coords.to_vec(),
            postscript_name_id: ps,
        }
    }

    #[test]
    fn empty_table_has_no_instances() {
        assert_eq!(InstanceTable::decode(&[]).unwrap(), InstanceTable::default());
    }

    #[test]
    fn instances_without_postscript_field() {
        let data = fvar_table(
            1,
            &[
                instance(256, &[400 << 16], None),
                instance(257, &[700 << 16], None),
            ],
            false,
        );
        assert_eq!(u16::from_be_bytes([data[14], data[15]]), 8);

        let table = InstanceTable::decode(&data).unwrap();
        assert_eq!(table.axis_count, 1);
        assert_eq!(table.instances.len(), 2);
        for inst in &table.instances {
            assert_eq!(inst.coordinates.len(), 1);
            assert_eq!(inst.postscript_name_id, None);
        }
        assert_eq!(table.instances[1].subfamily_name_id, 257);
        assert_eq!(table.tuples(), vec![vec![400 << 16], vec![700 << 16]]);
    }

    #[test]
    fn instances_with_postscript_field() {
        let data = fvar_table(
            2,
            &[
                instance(256, &[100 << 16, 1 << 15], Some(300)),
                instance(257, &[900 << 16, -(1 << 16)], Some(301)),
            ],
            true,
        );
        let table = InstanceTable::decode(&data).unwrap();

        assert_eq!(table.instances[0].postscript_name_id, Some(300));
        assert_eq!(table.instances[1].postscript_name_id, Some(301));
        assert_eq!(table.instances[1].coordinates, vec![900 << 16, -(1 << 16)]);
        assert_eq!(table.postscript_ordinals(301).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn shared_subfamily_ids_report_every_ordinal() {
        let data = fvar_table(
            1,
            &[
                instance(2, &[0], None),
                instance(258, &[1], None),
                instance(2, &[2], None),
            ],
            false,
        );
        let table = InstanceTable::decode(&data).unwrap();

        assert_eq!(table.subfamily_ordinals(2).collect::<Vec<_>>(), vec![0, 2]);
        assert!(table.names_instance(258));
        assert!(!table.names_instance(259));
    }

    #[test]
    fn unsupported_version_is_ignored() {
        let mut data = fvar_table(1, &[instance(256, &[0], None)], false);
        data[0..2].copy_from_slice(&2u16.to_be_bytes());

        assert!(InstanceTable::decode(&data).unwrap().instances.is_empty());
    }

    #[test]
    fn truncated_instance_array_is_an_error() {
        let data = fvar_table(1, &[instance(256, &[0], None)], false);
        let err = InstanceTable::decode(&data[..data.len() - 2]).unwrap_err();

        assert!(matches!(err, FontDbError::Parse { .. }));
    }
}
