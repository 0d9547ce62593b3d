//! Start-up errors
//!
//! The simulation itself cannot fail; only bringing up the page and the GPU
//! can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TankError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("element #{0} is not a canvas")]
    NotCanvas(String),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, TankError>;
