//! The shipped demo programs.

use std::path::{Path, PathBuf};

use luchadores::language::{parse, pretty::pretty_print};
use luchadores::runtime::Session;

fn demos() -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn demos_exist() {
    assert!(demos().len() >= 4);
}

#[test]
fn demos_survive_pretty_printing() {
    let session = Session::default();
    for path in demos() {
        let loaded = session.load_file(&path).unwrap();
        let printed = pretty_print(loaded.program());
        let reparsed = parse(&printed).unwrap();
        assert_eq!(reparsed.summary(), loaded.program().summary(), "{}", path.display());

        let original = session.run(&loaded).unwrap();
        let again = session.load_source("printed", &printed).unwrap();
        let rerun = session.run(&again).unwrap();
        assert_eq!(original.log, rerun.log, "{}", path.display());
        assert_eq!(original.result, rerun.result, "{}", path.display());
    }
}

#[test]
fn demos_render_in_both_formats() {
    use luchadores::debug::{FormatConfig, OutputFormat};
    use luchadores::runtime::SessionConfig;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let session = Session::new(
            SessionConfig::new().with_format(FormatConfig::new().with_format(format).with_stats(true)),
        );
        for path in demos() {
            let loaded = session.load_file(&path).unwrap();
            let combat = session.run(&loaded).unwrap();
            let lines = session.render(&combat);
            assert!(lines.len() > combat.log.len(), "{}", path.display());
        }
    }
}
