use std::fmt::{self, Display, Formatter};

/// Data types a driver value can carry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DataType {
    Null,
    Int,
    Float,
    Text,
    Blob,

    /// Values that follow `NUMERIC` affinity.
    Numeric,

    // declared-type extensions
    Bool,
    Int64,
    Date,
    Time,
    Datetime,
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl DataType {
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub fn name(&self) -> &str {
        match self {
            DataType::Null => "NULL",
            DataType::Text => "TEXT",
            DataType::Float => "REAL",
            DataType::Blob => "BLOB",
            DataType::Int | DataType::Int64 => "INTEGER",
            DataType::Numeric => "NUMERIC",

            DataType::Bool => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Time => "TIME",
            DataType::Datetime => "DATETIME",
        }
    }
}

#[test]
fn test_data_type_display() {
    assert_eq!(DataType::Int64.to_string(), "INTEGER");
    assert_eq!(DataType::Datetime.to_string(), "DATETIME");
    assert_eq!(format!("{:>6}", DataType::Text), "  TEXT");
}
