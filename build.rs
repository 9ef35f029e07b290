use anyhow::{bail, Context, Result};
use glob::glob;
use std::fs::{read_to_string, write};
use std::path::PathBuf;

struct ShaderData {
    src: String,
    src_path: PathBuf,
    spv_path: PathBuf,
    kind: shaderc::ShaderKind,
}

impl ShaderData {
    fn load(src_path: PathBuf) -> Result<Self> {
        let extension = src_path
            .extension()
            .and_then(|ext| ext.to_str())
            .with_context(|| format!("shader without extension: {}", src_path.display()))?;
        let kind = match extension {
            "vert" => shaderc::ShaderKind::Vertex,
            "frag" => shaderc::ShaderKind::Fragment,
            _ => bail!("unsupported shader: {}", src_path.display()),
        };
        let src = read_to_string(&src_path)
            .with_context(|| format!("cannot read {}", src_path.display()))?;
        let spv_path = src_path.with_extension(format!("{}.spv", extension));
        Ok(Self { src, src_path, spv_path, kind })
    }
}

// Compiles every GLSL shader under src/ into a .spv next to it, so the
// renderer can pull them in with `include_spirv!`.
fn main() -> Result<()> {
    let mut shaders = Vec::new();
    for pattern in &["./src/**/*.vert", "./src/**/*.frag"] {
        for entry in glob(pattern)? {
            shaders.push(ShaderData::load(entry?)?);
        }
    }

    let mut compiler = shaderc::Compiler::new().context("Unable to create shader compiler")?;
    for shader in shaders {
        println!("cargo:rerun-if-changed={}", shader.src_path.display());
        let file_name = shader.src_path.to_string_lossy();
        let compiled = compiler
            .compile_into_spirv(&shader.src, shader.kind, &file_name, "main", None)
            .with_context(|| format!("failed to compile {}", shader.src_path.display()))?;
        write(&shader.spv_path, compiled.as_binary_u8())?;
    }
    Ok(())
}
