pub mod docx;

pub use docx::build_summary_docx;
