use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;
use watermark_overlay::{
    load_image, save_image, session, Console, Error, OutputFormat, RunOptions, Transparency,
};

fn path_str(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

/// Run a session with `answers` and return the result plus the transcript.
fn run_session(answers: &str) -> (watermark_overlay::Result<String>, String) {
    let mut console = Console::new(Cursor::new(answers.to_string()), Vec::new());
    let result = session::run(&mut console, &RunOptions::default());
    let transcript = String::from_utf8(console.into_output()).unwrap();
    (result, transcript)
}

struct Fixture {
    dir: TempDir,
    base: String,
    watermark: String,
}

/// 4x4 black RGB base and a 2x2 white RGB watermark.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path(), "base.png");
    let watermark = path_str(dir.path(), "mark.png");
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&base).unwrap();
    RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]))
        .save(&watermark)
        .unwrap();
    Fixture {
        dir,
        base,
        watermark,
    }
}

#[test]
fn single_placement_session_writes_blended_png() {
    let fx = fixture();
    let out = path_str(fx.dir.path(), "out.png");
    let answers = format!("{}\n{}\nno\n50\nsingle\n1 1\n{out}\n", fx.base, fx.watermark);

    let (result, transcript) = run_session(&answers);
    assert_eq!(result.unwrap(), out);

    let expected = format!(
        "Input the image filename:\n\
         Input the watermark image filename:\n\
         Do you want to set a transparency color?\n\
         Input the watermark transparency percentage (Integer 0-100):\n\
         Choose the position method (single, grid):\n\
         Input the watermark position ([x 0-2] [y 0-2]):\n\
         Input the output image filename (jpg or png extension):\n\
         The watermarked image {out} has been created.\n"
    );
    assert_eq!(transcript, expected);

    let written = image::open(&out).unwrap().into_rgb8();
    assert_eq!(written.dimensions(), (4, 4));
    assert_eq!(*written.get_pixel(1, 1), Rgb([127, 127, 127]));
    assert_eq!(*written.get_pixel(2, 2), Rgb([127, 127, 127]));
    assert_eq!(*written.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*written.get_pixel(3, 3), Rgb([0, 0, 0]));
}

#[test]
fn grid_session_with_chroma_key_tiles_and_skips_key() {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path(), "base.png");
    let mark = path_str(dir.path(), "mark.png");
    let out = path_str(dir.path(), "out.png");

    RgbImage::from_pixel(4, 2, Rgb([10, 10, 10])).save(&base).unwrap();
    let mut watermark = RgbImage::from_pixel(2, 1, Rgb([0, 255, 0]));
    watermark.put_pixel(1, 0, Rgb([200, 200, 200]));
    watermark.save(&mark).unwrap();

    let answers = format!("{base}\n{mark}\nyes\n0 255 0\n100\ngrid\n{out}\n");
    let (result, transcript) = run_session(&answers);
    assert!(result.is_ok(), "transcript:\n{transcript}");
    assert!(transcript.contains("Input a transparency color ([Red] [Green] [Blue]):\n"));

    let written = image::open(&out).unwrap().into_rgb8();
    for (x, y, px) in written.enumerate_pixels() {
        let expected = if x % 2 == 0 {
            Rgb([10, 10, 10])
        } else {
            Rgb([200, 200, 200])
        };
        assert_eq!(*px, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn translucent_watermark_is_offered_its_alpha_channel() {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path(), "base.png");
    let mark = path_str(dir.path(), "mark.png");
    let out = path_str(dir.path(), "out.png");

    RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])).save(&base).unwrap();
    let mut watermark = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
    watermark.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
    watermark.save(&mark).unwrap();

    let answers = format!("{base}\n{mark}\nyes\n100\ngrid\n{out}\n");
    let (result, transcript) = run_session(&answers);
    assert!(result.is_ok(), "transcript:\n{transcript}");
    assert!(transcript.contains("Do you want to use the watermark's Alpha channel?\n"));

    let written = image::open(&out).unwrap().into_rgb8();
    assert_eq!(*written.get_pixel(0, 0), Rgb([200, 100, 50]));
    assert_eq!(*written.get_pixel(1, 1), Rgb([0, 0, 0]));
}

#[test]
fn diagnostics_stop_the_session_without_output() {
    let fx = fixture();
    let out = path_str(fx.dir.path(), "out.png");
    let head = format!("{}\n{}\n", fx.base, fx.watermark);
    let cases = [
        (format!("{head}no\nfifty\n"), "The transparency percentage isn't an integer number."),
        (format!("{head}no\n101\n"), "The transparency percentage is out of range."),
        (format!("{head}yes\n1 2\n"), "The transparency color input is invalid."),
        (format!("{head}no\n50\ncenter\n"), "The position method input is invalid."),
        (format!("{head}no\n50\nsingle\n1\n"), "The position input is invalid."),
        (format!("{head}no\n50\nsingle\n3 0\n"), "The position input is out of range."),
        (
            format!("{head}no\n50\ngrid\n{out}.gif\n"),
            "The output file extension isn't \"jpg\" or \"png\".",
        ),
        (format!("{}\n{}\n", fx.watermark, fx.base), "The watermark's dimensions are larger."),
        ("missing.png\n".to_string(), "The file missing.png doesn't exist."),
    ];

    for (answers, message) in cases {
        let (result, _) = run_session(&answers);
        let err = result.unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), message);
    }
    assert!(!Path::new(&out).exists());
}

#[test]
fn grayscale_base_is_rejected_before_watermark_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path(), "gray.png");
    GrayImage::from_pixel(4, 4, Luma([90])).save(&base).unwrap();

    let (result, transcript) = run_session(&format!("{base}\n"));
    assert!(matches!(result, Err(Error::ColorComponents { .. })));
    assert_eq!(
        result.unwrap_err().to_string(),
        "The number of image color components isn't 3."
    );
    assert_eq!(transcript, "Input the image filename:\n");
}

/// Write a 4x4 8-bit palette PNG.
fn write_indexed_png(path: &str) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), 4, 4);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[0u8, 1, 0, 1].repeat(4)).unwrap();
    writer.finish().unwrap();
}

#[test]
fn indexed_base_is_rejected_as_wrong_depth() {
    let dir = tempfile::tempdir().unwrap();
    let base = path_str(dir.path(), "indexed.png");
    write_indexed_png(&base);

    let (result, transcript) = run_session(&format!("{base}\n"));
    assert_eq!(
        result.unwrap_err().to_string(),
        "The image isn't 24 or 32-bit."
    );
    assert_eq!(transcript, "Input the image filename:\n");
}

#[test]
fn indexed_watermark_is_rejected_as_wrong_depth() {
    let fx = fixture();
    let mark = path_str(fx.dir.path(), "indexed.png");
    write_indexed_png(&mark);

    let (result, _) = run_session(&format!("{}\n{mark}\n", fx.base));
    assert_eq!(
        result.unwrap_err().to_string(),
        "The watermark isn't 24 or 32-bit."
    );
}

#[test]
fn bmp_base_is_accepted() {
    let fx = fixture();
    let base = path_str(fx.dir.path(), "base.bmp");
    let out = path_str(fx.dir.path(), "out.png");
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&base).unwrap();

    let answers = format!("{base}\n{}\nno\n100\ngrid\n{out}\n", fx.watermark);
    let (result, transcript) = run_session(&answers);
    assert_eq!(result.unwrap(), out, "transcript:\n{transcript}");

    let written = image::open(&out).unwrap().into_rgb8();
    assert_eq!(written.dimensions(), (4, 4));
    assert!(written.pixels().all(|px| *px == Rgb([255, 255, 255])));
}

#[test]
fn png_round_trip_preserves_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.png");
    let img = RgbaImage::from_fn(5, 3, |x, y| {
        let v = u8::try_from(x * 40 + y * 7).unwrap();
        Rgba([v, 255 - v, v / 2, 255])
    });

    save_image(&img, &path, OutputFormat::Png, 100).unwrap();
    let loaded = load_image(&path.to_string_lossy()).unwrap();

    assert_eq!(loaded.dimensions(), (5, 3));
    assert_eq!(loaded.transparency, Transparency::Opaque);
    assert_eq!(loaded.pixels, img);
}

#[test]
fn jpeg_output_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.jpg");
    let img = RgbaImage::from_pixel(8, 6, Rgba([30, 60, 90, 255]));

    save_image(&img, &path, OutputFormat::Jpeg, 90).unwrap();
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (8, 6));
}

#[test]
fn exhausted_input_is_not_a_user_error() {
    let (result, _) = run_session("");
    assert!(!result.unwrap_err().is_user_error());
}
