mod versioned_schema;

pub use versioned_schema::{
    migrate_if_needed, open_versioned, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table,
    VersionedSchema, BASE_DB_VERSION, DEFAULT_TIMESTAMP,
};
