//! Parameter Storage Types
//!
//! A fixed-capacity name/value store. Typed parameter blocks register their
//! defaults here and read themselves back with per-field clamping, so a bad
//! value in the store can never produce an out-of-range tuning.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be changed after registration
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: ParamValue,
    flags: ParamFlags,
}

type Key = String<PARAM_NAME_LEN>;

fn key(name: &str) -> Result<Key, ParameterError> {
    let mut key = Key::new();
    key.push_str(name)
        .map_err(|_| ParameterError::NameTooLong)?;
    Ok(key)
}

/// Parameter store for robot configuration
pub struct ParameterStore {
    entries: FnvIndexMap<Key, Entry, MAX_PARAMS>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(&key(name).ok()?).map(|entry| &entry.value)
    }

    /// Overwrite a registered, writable parameter
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let entry = self
            .entries
            .get_mut(&key(name)?)
            .ok_or(ParameterError::Unknown)?;
        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }
        entry.value = value;
        Ok(())
    }

    /// Register `name` with its default value.
    ///
    /// Registering a name twice keeps the first registration and its
    /// current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }
        self.entries
            .insert(
                key,
                Entry {
                    value: default_value,
                    flags,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Read a numeric parameter clamped to `[min, max]`, or `default` if it
    /// is missing or NaN
    pub fn get_float(&self, name: &str, default: f32, min: f32, max: f32) -> f32 {
        match self.get(name) {
            Some(ParamValue::Float(v)) if !v.is_nan() => v.clamp(min, max),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(min, max),
            _ => default,
        }
    }

    /// Read an integer parameter clamped to `[min, max]`, or `default` if it
    /// is missing. Floats are truncated.
    pub fn get_int(&self, name: &str, default: i32, min: i32, max: i32) -> i32 {
        match self.get(name) {
            Some(ParamValue::Int(v)) => (*v).clamp(min, max),
            Some(ParamValue::Float(v)) if !v.is_nan() => (*v as i32).clamp(min, max),
            _ => default,
        }
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
