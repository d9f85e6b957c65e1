//! End-to-end tests: link files on disk through to recorded primitives

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use links_track::render::{Paint, Primitive};
use links_track::{
    LinkParseError, LinksTrack, LinksTrackError, RecordingSurface, Region, TrackConfig,
};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const CONTACTS: &str = "\
track name=contacts
chr1\t100\t200\tchr1\t250\t300\t1
chr1\t1000\t1100\tchr1\t400\t500\t4
chr2\t10\t20\tchr2\t30\t40\t2
chr1\t5\t10\tchrX\t20\t30\t7
";

fn write_plain(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn load(path: &Path, pairs: &[(&str, &str)]) -> LinksTrack {
    let config = TrackConfig::from_pairs(pairs.iter().copied()).unwrap();
    LinksTrack::from_path(path, config, None).unwrap()
}

#[test]
fn test_plain_file() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let track = load(&path, &[]);

    assert_eq!(track.index().total_intervals(), 3);
    assert_eq!(track.parse_stats().headers, 1);
    assert_eq!(track.parse_stats().cross_chrom, 1);
    assert_eq!(track.scores().min_score(), Some(1.0));
    assert_eq!(track.scores().max_score(), Some(4.0));
}

#[test]
fn test_gzip_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.links.gz");
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(CONTACTS.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let track = load(&path, &[]);
    assert_eq!(track.index().total_intervals(), 3);
}

#[test]
fn test_bzip2_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.bedpe.bz2");
    let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(CONTACTS.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let track = load(&path, &[]);
    assert_eq!(track.index().total_intervals(), 3);
}

#[test]
fn test_missing_file() {
    let err = LinksTrack::from_path(
        Path::new("/nonexistent/contacts.links"),
        TrackConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LinksTrackError::Parse(LinkParseError::FileNotFound(_))
    ));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(
        &dir,
        "bad.links",
        "chr1\t1\t2\tchr1\t3\t4\nchr1\t1\t2\tchr1\n",
    );
    let err = LinksTrack::from_path(&path, TrackConfig::default(), None).unwrap_err();
    match err {
        LinksTrackError::Parse(e) => assert_eq!(e.line_number(), Some(2)),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_colormap_with_explicit_bounds() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let track = load(
        &path,
        &[("color", "Reds_r"), ("min_value", "0"), ("max_value", "10")],
    );

    let mut surface = RecordingSurface::new();
    track.plot_colorbar(&mut surface);
    track.plot(&mut surface, "chr1", 50, 2000);

    assert_eq!(
        surface.primitives[0],
        Primitive::Colorbar {
            colormap: "Reds_r".to_string(),
            vmin: 0.0,
            vmax: 10.0
        }
    );
    for primitive in &surface.primitives[1..] {
        match primitive {
            Primitive::Arc { stroke, .. } => assert!(matches!(stroke.paint, Paint::Rgb(_))),
            other => panic!("expected arc, got {:?}", other),
        }
    }
}

#[test]
fn test_colormap_without_scores_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(
        &dir,
        "noscore.links",
        "chr1\t100\t200\tchr1\t250\t300\t1\nchr1\t400\t500\tchr1\t600\t700\n",
    );
    let track = load(&path, &[("color", "viridis")]);

    let mut surface = RecordingSurface::new();
    track.plot_colorbar(&mut surface);
    assert!(surface.primitives.is_empty());

    track.plot(&mut surface, "chr1", 0, 1000);
    match &surface.primitives[0] {
        Primitive::Arc { stroke, .. } => {
            assert_eq!(stroke.paint, Paint::Named("blue".to_string()));
            assert_eq!(stroke.line_width, 0.5);
        }
        other => panic!("expected arc, got {:?}", other),
    }
}

#[test]
fn test_alternate_chrom_and_region_restriction() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let regions = [Region::new("1", 0, 2000)];
    let track = LinksTrack::from_path(&path, TrackConfig::default(), Some(&regions)).unwrap();

    // chr2 is filtered out, chr1 is found through its alternate name
    assert_eq!(track.index().total_intervals(), 2);
    let mut surface = RecordingSurface::new();
    let summary = track.plot_region(&mut surface, &regions[0]);
    assert_eq!(summary.links_drawn, 2);
}

#[test]
fn test_use_middle_changes_geometry() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let track = load(&path, &[("use_middle", "true")]);

    let mut surface = RecordingSurface::new();
    track.plot(&mut surface, "chr2", 0, 100);
    match &surface.primitives[0] {
        Primitive::Arc {
            center,
            width,
            height,
            ..
        } => assert_eq!((*center, *width, *height), (25.0, 20.0, 20.0)),
        other => panic!("expected arc, got {:?}", other),
    }
}

#[test]
fn test_tsv_output() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let track = load(&path, &[("color", "red"), ("line_width", "2")]);

    let mut surface = RecordingSurface::new();
    track.plot(&mut surface, "chr2", 0, 100);
    let tsv = surface.to_tsv();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines[0], "ylim\t-1\t33");
    assert_eq!(lines[1], "arc\t25\t30\t30\tred\t2\tsolid\t0.8");
}

#[test]
fn test_nan_score_drawn_transparent() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(
        &dir,
        "nan.links",
        "chr1\t100\t200\tchr1\t250\t300\t1\nchr1\t400\t500\tchr1\t600\t700\tnan\nchr1\t800\t900\tchr1\t950\t990\t4\n",
    );
    let track = load(&path, &[("color", "viridis")]);
    assert!(track.scores().has_score);
    assert_eq!(track.scores().min_score(), Some(1.0));
    assert_eq!(track.scores().max_score(), Some(4.0));

    let mut surface = RecordingSurface::new();
    track.plot(&mut surface, "chr1", 0, 1000);
    match &surface.primitives[1] {
        Primitive::Arc { stroke, .. } => {
            assert_eq!(stroke.paint, Paint::Transparent);
            assert_eq!(stroke.line_width, 0.5);
        }
        other => panic!("expected arc, got {:?}", other),
    }
}

#[test]
fn test_unknown_chrom_leaves_limits_unset() {
    let dir = TempDir::new().unwrap();
    let path = write_plain(&dir, "contacts.links", CONTACTS);
    let track = load(&path, &[("ylim", "1000")]);

    let mut surface = RecordingSurface::new();
    let summary = track.plot(&mut surface, "chr22", 0, 1000);
    assert_eq!(summary.links_drawn, 0);
    assert_eq!(summary.y_limits, None);
    assert_eq!(surface.to_tsv(), "");
}
