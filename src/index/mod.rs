//! Index assembly: records, budget accounting, deep detail and the
//! generation pipeline that ties them together

pub mod assembler;
pub mod deep;
pub mod directories;
pub mod generator;
pub mod record;
pub mod types;

pub use assembler::{IndexAssembler, TokenBudget};
pub use generator::{GenerateOptions, GenerateReport, Generator};
pub use types::{
    DeepDetail, DirectoryRecord, FileRecord, FunctionInfo, IndexMetadata, Mode, ProjectIndex,
    SymbolDescriptor,
};
