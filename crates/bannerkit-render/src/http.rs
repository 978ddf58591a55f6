//! Network image loading.

use crate::assets::{BoxFuture, DecodedImage, ImageLoader, LoadError, SourceLoader};
use std::time::Duration;

/// Largest response body accepted for one image.
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `http(s)` images and hands every other source to a [`SourceLoader`].
///
/// Requests are blocking. Drive it from a thread that is not inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: reqwest::blocking::Client,
    local: SourceLoader,
}

impl HttpLoader {
    pub fn new(local: SourceLoader) -> Result<Self, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("bannerkit/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LoadError::Network {
                url: String::new(),
                message: format!("client setup failed: {e}"),
            })?;
        Ok(Self::with_client(client, local))
    }

    /// Use a preconfigured client, e.g. with a proxy or custom timeout.
    pub fn with_client(client: reqwest::blocking::Client, local: SourceLoader) -> Self {
        Self { client, local }
    }

    fn fetch(&self, url: &str) -> Result<DecodedImage, LoadError> {
        let network = |message: String| LoadError::Network {
            url: url.to_string(),
            message,
        };
        log::debug!("Fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(network(format!("HTTP {status}")));
        }
        if response.content_length().is_some_and(|len| len > MAX_IMAGE_BYTES) {
            return Err(network(format!("body exceeds {MAX_IMAGE_BYTES} bytes")));
        }
        let body = response.bytes().map_err(|e| network(e.to_string()))?;
        if body.len() as u64 > MAX_IMAGE_BYTES {
            return Err(network(format!("body exceeds {MAX_IMAGE_BYTES} bytes")));
        }
        DecodedImage::from_encoded(&body)
    }
}

impl ImageLoader for HttpLoader {
    fn load<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<DecodedImage, LoadError>> {
        Box::pin(async move {
            if source.starts_with("http://") || source.starts_with("https://") {
                self.fetch(source)
            } else {
                self.local.load_sync(source)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 3, 2);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[200; 3 * 2 * 4]).unwrap();
        }
        bytes
    }

    /// Answer one request on a local port and return its URL.
    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });
        format!("http://{addr}/pixel.png")
    }

    fn loader() -> HttpLoader {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpLoader::with_client(client, SourceLoader::new())
    }

    #[test]
    fn test_fetch_png() {
        let url = serve_once("200 OK", png_bytes());
        let image = pollster::block_on(loader().load(&url)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn test_http_error_status() {
        let url = serve_once("404 Not Found", Vec::new());
        let err = pollster::block_on(loader().load(&url)).unwrap_err();
        assert!(matches!(&err, LoadError::Network { message, .. } if message.contains("404")));
    }

    #[test]
    fn test_local_sources_delegate() {
        assert!(matches!(
            pollster::block_on(loader().load("/definitely/missing.png")),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            pollster::block_on(loader().load("data:image/png,raw")),
            Err(LoadError::InvalidDataUri(_))
        ));
    }
}
