//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GpuBackend {
    #[default]
    Auto,
    #[value(alias = "vk")]
    Vulkan,
    #[value(alias = "d3d12")]
    Dx12,
    #[value(alias = "mtl")]
    Metal,
    #[value(alias = "opengl", alias = "gles")]
    Gl,
}

impl From<GpuBackend> for wgpu::Backends {
    fn from(backend: GpuBackend) -> Self {
        match backend {
            GpuBackend::Auto => wgpu::Backends::all(),
            GpuBackend::Vulkan => wgpu::Backends::VULKAN,
            GpuBackend::Dx12 => wgpu::Backends::DX12,
            GpuBackend::Metal => wgpu::Backends::METAL,
            GpuBackend::Gl => wgpu::Backends::GL,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "catscene", version, about = "Rotating cubes and a cat, rendered with wgpu")]
pub struct Cli {
    /// Graphics API to request from wgpu.
    #[arg(long, value_enum, default_value_t = GpuBackend::Auto)]
    pub gpu_backend: GpuBackend,

    /// Initial window size, e.g. 1280x720.
    #[arg(long, value_parser = parse_size, default_value = "1280x720")]
    pub size: (u32, u32),

    /// Directory containing `resources/`.
    #[arg(long, default_value = ".")]
    pub asset_root: PathBuf,

    /// Start the frame loop even if the model fails to load.
    #[arg(long)]
    pub animate_without_model: bool,
}

impl Cli {
    pub fn into_config(self) -> platform::Config {
        let (width, height) = self.size;
        platform::Config {
            backends: self.gpu_backend.into(),
            width,
            height,
            asset_root: self.asset_root,
            animate_without_model: self.animate_without_model,
        }
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid dimension '{s}': {e}"))
    };
    let (w, h) = (parse(w)?, parse(h)?);
    if w == 0 || h == 0 {
        return Err(format!("window size must be non-zero, got {w}x{h}"));
    }
    Ok((w, h))
}
