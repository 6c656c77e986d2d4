//! The interactive viewer export: one self-contained HTML document with the
//! raster inlined as a data URL, the label/value arrays in raster order, and
//! a client-side pan/zoom/tooltip shell. Nothing is served; the document is
//! complete on disk.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Chainable, Result};
use crate::raster::Raster;

/// Run metadata shown in the viewer header.
#[derive(Debug)]
pub struct RunMeta<'a> {
    pub metric: &'a str,
    pub color: &'a str,
    pub source: &'a str,
}

/// Refuse to inline a PNG beyond this size rather than emit a document no
/// browser will open.
const EMBED_LIMIT: usize = 64 * 1024 * 1024;

static ENGINE: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("viewer.html", include_str!("viewer.html"))
        .expect("embedded viewer template must parse");
    env
});

/// The tooltip arrays, serialized as one JSON object. Indexing is raster
/// order: the value at linear index `i` sits at grid cell
/// `(i % size, i / size)`, exactly as the renderer wrote it.
#[derive(Serialize)]
struct Payload<'a> {
    size: u32,
    labels: Vec<&'a str>,
    values: Vec<f64>,
}

/// Render the viewer document for `raster` as a string.
pub fn document(raster: &Raster, meta: &RunMeta<'_>) -> Result<String> {
    let mut png = Vec::new();
    raster.image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .chain_with(|| "failed to encode raster for embedding")?;

    if png.len() > EMBED_LIMIT {
        return err! {
            "raster too large to embed in a viewer document",
            "encoded size" => format!("{} bytes", png.len()),
            "limit" => format!("{EMBED_LIMIT} bytes"),
        };
    }

    let payload = Payload {
        size: raster.side,
        labels: raster.samples.iter().map(|s| s.label.as_str()).collect(),
        values: raster.samples.iter().map(|s| s.value).collect(),
    };

    // `</` must not appear inside an inline <script> block.
    let data = serde_json::to_string(&payload)?.replace("</", "<\\/");

    let html = ENGINE.get_template("viewer.html")
        .and_then(|template| template.render(context! {
            source => meta.source,
            metric => meta.metric,
            color => meta.color,
            count => raster.len(),
            size => raster.side,
            image => BASE64.encode(&png),
            data => data,
        }))
        .chain_with(|| "failed to render viewer template")?;

    Ok(html)
}

/// Render the viewer document and write it to `path`.
pub fn export<P: AsRef<Path>>(raster: &Raster, meta: &RunMeta<'_>, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, document(raster, meta)?).chain_with(|| error! {
        "failed to write viewer document",
        "path" => path.display(),
    })
}
