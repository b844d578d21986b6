// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend setup errors.

use core::fmt;

/// Errors that can occur while bringing up a [`WgpuBackend`](crate::WgpuBackend).
#[derive(Debug)]
pub enum BackendError {
    /// The window could not be turned into a wgpu surface.
    CreateSurface(wgpu::CreateSurfaceError),
    /// No adapter is compatible with the window surface.
    NoAdapter,
    /// The adapter refused to create a device.
    RequestDevice(wgpu::RequestDeviceError),
    /// The surface has no usable configuration on the chosen adapter.
    UnsupportedSurface,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateSurface(e) => write!(f, "failed to create surface: {e}"),
            Self::NoAdapter => write!(f, "no compatible GPU adapter"),
            Self::RequestDevice(e) => write!(f, "failed to create device: {e}"),
            Self::UnsupportedSurface => write!(f, "surface is not supported by the adapter"),
        }
    }
}

impl core::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::CreateSurface(e) => Some(e),
            Self::RequestDevice(e) => Some(e),
            Self::NoAdapter | Self::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for BackendError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        Self::CreateSurface(e)
    }
}

impl From<wgpu::RequestDeviceError> for BackendError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Self::RequestDevice(e)
    }
}
