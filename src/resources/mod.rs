//! Loading of files from the `res/` directory.
//!
//! Relative paths are looked up in the working directory first and then in
//! the crate directory, so the demo also finds its resources when started
//! from elsewhere. The loaders use `tokio::fs` and must run inside a tokio
//! runtime.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data_structures::texture::Texture;

pub fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let fallback = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if fallback.exists() {
        fallback
    } else {
        path.to_path_buf()
    }
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    let path = resolve(path);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    let path = resolve(path);
    tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

pub async fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> anyhow::Result<Texture> {
    let data = load_binary(path).await?;
    Texture::from_bytes(device, queue, &data, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_crate_relative_resources() {
        let resolved = resolve(Path::new("res/shaders/Basic.shader"));
        assert!(resolved.exists(), "{} not found", resolved.display());
    }

    #[test]
    fn missing_files_keep_their_path() {
        let missing = Path::new("res/nothing/here.png");
        assert_eq!(resolve(missing), missing.to_path_buf());
    }

    #[tokio::test]
    async fn load_errors_name_the_file() {
        let err = load_binary(Path::new("res/nothing/here.png"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("here.png"));
    }

    #[tokio::test]
    async fn loads_the_bundled_shader() {
        let text = load_string(Path::new("res/shaders/Basic.shader"))
            .await
            .unwrap();
        assert!(text.contains("#shader vertex"));
    }
}
