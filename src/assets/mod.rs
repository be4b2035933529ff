//! Background texture loading.
//!
//! Images are read and decoded on worker threads; the render loop polls for
//! finished ones with [`TextureLoader::drain`] and uploads them itself, since
//! only the render thread may touch the GPU.

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("couldn't read texture {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't decode texture {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A texture that finished loading, still in its encoded form. `T` identifies
/// what the texture was requested for.
#[derive(Debug, Clone)]
pub struct LoadedTexture<T> {
    pub target: T,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl<T> LoadedTexture<T> {
    /// Name to register the texture under. Two requests for the same file share it.
    pub fn name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

type LoadResult<T> = Result<LoadedTexture<T>, TextureError>;

pub struct TextureLoader<T> {
    root: PathBuf,
    sender: mpsc::Sender<LoadResult<T>>,
    receiver: mpsc::Receiver<LoadResult<T>>,
    pending: usize,
}

impl<T: Send + 'static> TextureLoader<T> {
    /// Paths passed to `request` are resolved relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        TextureLoader {
            root: root.into(),
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of requests that haven't come back through `drain` yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Starts loading a texture in the background and returns immediately.
    pub fn request(&mut self, target: T, path: impl AsRef<Path>) {
        let path = self.root.join(path);
        let sender = self.sender.clone();
        self.pending += 1;

        debug!(path = %path.display(), "requesting texture");
        thread::spawn(move || {
            // The receiver only goes away when the loader does, and then nobody
            // wants the texture anyway.
            let _ = sender.send(load_texture(target, path));
        });
    }

    /// Collects every texture that has finished since the last call. Failures
    /// are logged and dropped; whatever they were meant for keeps its default
    /// material.
    pub fn drain(&mut self) -> Vec<LoadedTexture<T>> {
        let mut loaded = vec![];
        while let Ok(result) = self.receiver.try_recv() {
            self.pending -= 1;
            match result {
                Ok(texture) => {
                    debug!(
                        path = %texture.path.display(),
                        width = texture.width,
                        height = texture.height,
                        "texture ready"
                    );
                    loaded.push(texture);
                }
                Err(err) => {
                    let cause = err.source().map(|e| e.to_string()).unwrap_or_default();
                    warn!(%err, %cause, "texture failed to load, keeping default material");
                }
            }
        }
        loaded
    }

    /// Blocks until every outstanding request has come back. Meant for tools and
    /// tests; the render loop should stick to `drain`.
    pub fn wait_all(&mut self) -> Vec<LoadResult<T>> {
        let mut results = vec![];
        while self.pending > 0 {
            match self.receiver.recv() {
                Ok(result) => {
                    self.pending -= 1;
                    results.push(result);
                }
                Err(_) => break,
            }
        }
        results
    }
}

/// Reads and decodes one image. Decoding here means the render thread only ever
/// sees bytes that are known to be a valid image.
pub fn load_texture<T>(target: T, path: PathBuf) -> LoadResult<T> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) => return Err(TextureError::Io { path, source }),
    };
    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image,
        Err(source) => return Err(TextureError::Decode { path, source }),
    };

    Ok(LoadedTexture {
        target,
        path,
        bytes,
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        image.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_texture((), dir.path().join("nope.jpg"));
        assert!(matches!(result, Err(TextureError::Io { .. })));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_texture((), path);
        assert!(matches!(result, Err(TextureError::Decode { .. })));
    }

    #[test]
    fn test_loads_in_background() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 4, 2);
        write_png(dir.path(), "b.png", 8, 8);

        let mut loader = TextureLoader::new(dir.path());
        loader.request(1, "a.png");
        loader.request(2, "b.png");
        loader.request(3, "missing.png");
        assert_eq!(loader.pending(), 3);

        let results = loader.wait_all();
        assert_eq!(loader.pending(), 0);
        assert_eq!(results.len(), 3);

        let mut loaded: Vec<_> = results.into_iter().filter_map(Result::ok).collect();
        loaded.sort_by_key(|t| t.target);
        assert_eq!(loaded.len(), 2);
        assert_eq!((loaded[0].target, loaded[0].width, loaded[0].height), (1, 4, 2));
        assert_eq!((loaded[1].target, loaded[1].width, loaded[1].height), (2, 8, 8));
        assert_eq!(loaded[0].name(), dir.path().join("a.png").to_string_lossy());
    }

    #[test]
    fn test_drain_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 2, 2);

        let mut loader = TextureLoader::new(dir.path());
        loader.request("good", "a.png");
        loader.request("bad", "missing.png");

        let mut loaded = vec![];
        while loader.pending() > 0 {
            loaded.extend(loader.drain());
            std::thread::yield_now();
        }
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].target, "good");
    }
}
