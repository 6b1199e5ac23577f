use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use halo_renderer::{Configurable, EditorProfile, FrameEditor, Photo, ThemeCatalog};

#[derive(Parser, Debug)]
#[command(name = "halo-render", version)]
struct Cli {
    /// Editor profile JSON. Omitted fields fall back to the editor defaults.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Photo to place inside the frame (PNG or JPEG).
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Output PNG path. Defaults to the profile's deterministic file name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Device-scale factor for the output raster.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut editor = FrameEditor::new(ThemeCatalog::builtin());

    // The photo goes in first: loading one resets zoom and pan, and the
    // profile's own zoom and pan should win.
    if let Some(path) = &cli.photo {
        let bytes =
            std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
        let photo =
            Photo::from_bytes(&bytes).with_context(|| format!("decode photo '{}'", path.display()))?;
        editor.set_photo(photo);
    }

    if let Some(path) = &cli.profile {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read profile '{}'", path.display()))?;
        let profile = EditorProfile::from_json(&json)
            .with_context(|| format!("parse profile '{}'", path.display()))?;
        editor.apply_profile(&profile);
    }

    let out = cli
        .out
        .unwrap_or_else(|| PathBuf::from(editor.export_file_name()));

    let surface = editor.render_with_scale(cli.scale);
    let png = surface.encode_png()?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
