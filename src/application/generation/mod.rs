//! Generation application services

pub mod use_cases;

pub use use_cases::{
    GenerateArticleUseCase, GenerateBlogTitlesUseCase, GenerateImageUseCase, RemoveBackgroundUseCase,
    RemoveObjectUseCase, ReviewResumeUseCase, MAX_RESUME_BYTES,
};
