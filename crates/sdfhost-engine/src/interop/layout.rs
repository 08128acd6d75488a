use anyhow::Result;

use super::HEADER_LEN;
use crate::compute::ComputeModule;
use crate::error::HostError;

/// Section sizes in bytes, as declared by the compute module.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SectionSizes {
    pub fixed: usize,
    pub variable: usize,
}

impl SectionSizes {
    /// Validates raw sizes reported by the module against the shared memory length.
    ///
    /// Both sections must be non-empty multiples of [`wgpu::COPY_BUFFER_ALIGNMENT`], the
    /// fixed section must hold the configuration header, and both must fit in memory.
    pub fn validate(fixed: i32, variable: i32, memory_len: usize) -> Result<Self, HostError> {
        let invalid = || HostError::InvalidLayout {
            fixed: fixed.into(),
            variable: variable.into(),
            memory: memory_len,
        };

        let fixed_len = usize::try_from(fixed).map_err(|_| invalid())?;
        let variable_len = usize::try_from(variable).map_err(|_| invalid())?;
        let align = wgpu::COPY_BUFFER_ALIGNMENT as usize;

        if fixed_len < HEADER_LEN
            || variable_len == 0
            || fixed_len % align != 0
            || variable_len % align != 0
        {
            return Err(invalid());
        }

        match fixed_len.checked_add(variable_len) {
            Some(end) if end <= memory_len => Ok(Self {
                fixed: fixed_len,
                variable: variable_len,
            }),
            _ => Err(invalid()),
        }
    }

    /// Byte offset of the variable section.
    pub fn variable_offset(&self) -> usize {
        self.fixed
    }

    /// The fixed section: bytes `[0, fixed)`.
    pub fn fixed_region_bytes<'m>(&self, memory: &'m [u8]) -> Result<&'m [u8], HostError> {
        memory.get(..self.fixed).ok_or_else(|| self.out_of_bounds(memory))
    }

    /// The variable section: bytes `[fixed, fixed + variable)`.
    pub fn variable_region_bytes<'m>(&self, memory: &'m [u8]) -> Result<&'m [u8], HostError> {
        let start = self.variable_offset();
        memory
            .get(start..start + self.variable)
            .ok_or_else(|| self.out_of_bounds(memory))
    }

    fn out_of_bounds(&self, memory: &[u8]) -> HostError {
        HostError::InvalidLayout {
            fixed: self.fixed as i64,
            variable: self.variable as i64,
            memory: memory.len(),
        }
    }
}

/// Queries both section sizes from the module and validates them.
///
/// Called once at startup and again every frame; the values are never cached across
/// frames.
pub fn query_section_sizes(module: &mut dyn ComputeModule) -> Result<SectionSizes> {
    let fixed = module.fixed_data_size()?;
    let variable = module.variable_data_size()?;
    Ok(SectionSizes::validate(fixed, variable, module.memory().len())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::mock::{Call, RecordingModule};

    #[test]
    fn accepts_sections_that_fit() {
        let sizes = SectionSizes::validate(32, 64, 96).unwrap();
        assert_eq!(sizes, SectionSizes { fixed: 32, variable: 64 });
        assert_eq!(sizes.variable_offset(), 32);
    }

    #[test]
    fn rejects_negative_sizes() {
        assert!(SectionSizes::validate(-16, 64, 1024).is_err());
        assert!(SectionSizes::validate(32, -4, 1024).is_err());
    }

    #[test]
    fn rejects_fixed_section_shorter_than_header() {
        assert!(SectionSizes::validate(12, 64, 1024).is_err());
    }

    #[test]
    fn rejects_empty_variable_section() {
        assert!(SectionSizes::validate(16, 0, 1024).is_err());
    }

    #[test]
    fn rejects_unaligned_sections() {
        assert!(SectionSizes::validate(18, 64, 1024).is_err());
        assert!(SectionSizes::validate(16, 62, 1024).is_err());
    }

    #[test]
    fn rejects_sections_past_end_of_memory() {
        let err = SectionSizes::validate(64, 64, 127).unwrap_err();
        assert!(matches!(
            err,
            HostError::InvalidLayout { fixed: 64, variable: 64, memory: 127 }
        ));
    }

    #[test]
    fn region_accessors_split_at_fixed_size() {
        let memory: Vec<u8> = (0..48).collect();
        let sizes = SectionSizes { fixed: 16, variable: 24 };

        let fixed = sizes.fixed_region_bytes(&memory).unwrap();
        let variable = sizes.variable_region_bytes(&memory).unwrap();

        assert_eq!(fixed, &memory[..16]);
        assert_eq!(variable.len(), 24);
        assert_eq!(variable[0], 16);
        assert_eq!(variable[23], 39);
    }

    #[test]
    fn region_accessors_never_over_read() {
        let memory = vec![0u8; 20];
        let sizes = SectionSizes { fixed: 16, variable: 8 };
        assert!(sizes.fixed_region_bytes(&memory).is_ok());
        assert!(sizes.variable_region_bytes(&memory).is_err());
    }

    #[test]
    fn query_asks_module_for_both_sizes() {
        let mut module = RecordingModule::new(256, 32, 128);
        let sizes = query_section_sizes(&mut module).unwrap();
        assert_eq!(sizes, SectionSizes { fixed: 32, variable: 128 });
        assert_eq!(module.calls, vec![Call::FixedDataSize, Call::VariableDataSize]);
    }

    #[test]
    fn query_rejects_layout_larger_than_memory() {
        let mut module = RecordingModule::new(64, 32, 128);
        let err = query_section_sizes(&mut module).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HostError>(),
            Some(HostError::InvalidLayout { .. })
        ));
    }
}
