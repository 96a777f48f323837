//! Social cube demo
//!
//! Opens the interactive scene with six faces bound to social links:
//! - Drag to spin the cube, flick for inertia
//! - Move the pointer to glide the camera
//! - Click a face to open its link in the browser
//! - The access form accepts the codes ABC, DEF and GHI

use clap::Parser;
use env_logger::Env;
use spincube_core::{FaceBinding, FaceBindings, TextureSource};
use spincube_viewer::{SceneViewer, ViewerConfig};
use std::path::PathBuf;

const SOCIAL_FACES: [(&str, &str, [u8; 3]); 6] = [
    ("github", "https://github.com", [24, 23, 23]),
    ("twitter", "https://twitter.com", [29, 161, 242]),
    ("linkedin", "https://www.linkedin.com", [10, 102, 194]),
    ("youtube", "https://www.youtube.com", [255, 0, 0]),
    ("twitch", "https://www.twitch.tv", [145, 70, 255]),
    ("instagram", "https://www.instagram.com", [225, 48, 108]),
];

#[derive(Parser, Debug)]
#[command(name = "social_cube", about = "Interactive spinning social cube")]
struct Args {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Sky panorama image
    #[arg(long)]
    sky: Option<PathBuf>,

    /// Directory holding one image per face, named after the face labels
    /// (github.png, twitter.png, ...)
    #[arg(long)]
    faces: Option<PathBuf>,

    /// Replace a face link, e.g. --link github=https://github.com/me
    #[arg(long = "link", value_name = "LABEL=URL")]
    links: Vec<String>,

    /// Hide the access code form
    #[arg(long)]
    no_form: bool,
}

fn link_overrides(links: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    links
        .iter()
        .map(|entry| {
            let (label, url) = entry
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("--link takes LABEL=URL, got {:?}", entry))?;
            anyhow::ensure!(
                SOCIAL_FACES.iter().any(|(known, _, _)| *known == label),
                "unknown face label {:?}",
                label
            );
            Ok((label.to_string(), url.to_string()))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let overrides = link_overrides(&args.links)?;

    println!("Spincube Social Cube Demo");
    println!("=========================");
    println!("Drag to spin, click a face to open its link.");

    let bindings = FaceBindings::new(SOCIAL_FACES.map(|(label, url, color)| {
        let url = overrides
            .iter()
            .find(|(overridden, _)| overridden == label)
            .map(|(_, url)| url.as_str())
            .unwrap_or(url);
        let texture = match &args.faces {
            Some(dir) => TextureSource::Path(dir.join(format!("{}.png", label))),
            None => TextureSource::Color(color),
        };
        FaceBinding::new(label, url, texture)
    }));

    let config = ViewerConfig {
        title: "Social Cube".to_string(),
        width: args.width,
        height: args.height,
        sky_image: args.sky,
        show_access_form: !args.no_form,
        ..ViewerConfig::default()
    };

    SceneViewer::new(bindings, config).run()?;
    Ok(())
}
