//! In-memory `World` for contract compilation.
//!
//! The contract template is a single source file; there is no package cache,
//! no asset directory and no real filesystem involved. Request data reaches
//! the template through `sys.inputs`.

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Array, Bytes, Datetime, Dict, Value};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use super::fonts::{global_font_cache, FontCache};
use super::RenderError;

/// A self-contained world holding exactly one source file.
pub struct ContractWorld {
    source: Source,
    font_cache: &'static FontCache,
    time: chrono::DateTime<Utc>,
    library: LazyHash<Library>,
}

impl ContractWorld {
    /// Create a world for the given source with `sys.inputs` populated from
    /// the provided JSON values.
    pub fn new(
        source: String,
        inputs: HashMap<String, serde_json::Value>,
    ) -> Result<Self, RenderError> {
        let id = FileId::new(None, VirtualPath::new("/main.typ"));
        let inputs_dict = convert_inputs(inputs)?;
        let library = Library::builder().with_inputs(inputs_dict).build();

        Ok(Self {
            source: Source::new(id, source),
            font_cache: global_font_cache(),
            time: Utc::now(),
            library: LazyHash::new(library),
        })
    }
}

impl World for ContractWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.font_cache.book()
    }

    fn main(&self) -> FileId {
        self.source.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.source.id() {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let offset_hours = offset.unwrap_or(0);
        let adjusted = self.time + chrono::Duration::hours(offset_hours);

        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

/// Convert a JSON map into the Typst `Dict` exposed as `sys.inputs`.
fn convert_inputs(inputs: HashMap<String, serde_json::Value>) -> Result<Dict, RenderError> {
    let mut dict = Dict::new();
    for (key, value) in inputs {
        dict.insert(key.into(), json_to_typst_value(&value)?);
    }
    Ok(dict)
}

fn json_to_typst_value(json: &serde_json::Value) -> Result<Value, RenderError> {
    match json {
        serde_json::Value::Null => Ok(Value::None),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(RenderError::InvalidInput(format!("invalid number: {}", n)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s.as_str().into())),
        serde_json::Value::Array(arr) => {
            let items: Vec<Value> = arr
                .iter()
                .map(json_to_typst_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(Array::from(items.as_slice())))
        }
        serde_json::Value::Object(obj) => {
            let mut dict = Dict::new();
            for (k, v) in obj {
                dict.insert(k.as_str().into(), json_to_typst_value(v)?);
            }
            Ok(Value::Dict(dict))
        }
    }
}
