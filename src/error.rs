//! Error types for warpfield.
//!
//! The simulation itself cannot fail. Errors only come from invalid
//! configuration and from the native preview's window and GPU setup.

use thiserror::Error;

/// Errors reported by [`FieldConfig::validate`](crate::config::FieldConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The field must hold at least one particle.
    #[error("particle count must be at least 1")]
    NoParticles,
    /// Speeds must be positive and the range non-empty.
    #[error("invalid speed range {min}..{max}: speeds must be positive and min < max")]
    SpeedRange { min: f32, max: f32 },
    /// A hue band covers no hues.
    #[error("hue band {start}..{end} is empty")]
    EmptyHueBand { start: f32, end: f32 },
    /// Alpha values live in `0.0..=1.0`.
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    AlphaOutOfRange { name: &'static str, value: f32 },
    /// Every numeric constant must be finite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    /// Distances and radii cannot be negative.
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Errors that can occur during GPU initialization.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the native preview.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The field configuration was rejected.
    #[error("Invalid field configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::SpeedRange { min: 3.0, max: 1.0 };
        assert_eq!(
            err.to_string(),
            "invalid speed range 3..1: speeds must be positive and min < max"
        );

        let err = ConfigError::AlphaOutOfRange {
            name: "fade_alpha",
            value: 1.5,
        };
        assert!(err.to_string().contains("fade_alpha"));
    }
}
