use super::*;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("storage_fs").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn paths_resolve_against_root() {
    let dir = fixture_dir("resolve");
    std::fs::write(dir.join("SD1.TXT"), "alpha\r\nbeta\n").unwrap();

    let storage = FsStorage::new(&dir);
    assert!(storage.exists("SD1.TXT"));
    assert!(!storage.exists("SD9.TXT"));
    assert_eq!(storage.root(), dir.as_path());

    let mut stream = storage.open("SD1.TXT").unwrap();
    assert!(stream.available());
    assert_eq!(stream.read_line().unwrap().as_deref(), Some("alpha"));
    assert_eq!(stream.read_line().unwrap().as_deref(), Some("beta"));
    assert!(!stream.available());
    assert_eq!(stream.read_line().unwrap(), None);
}

#[test]
fn directories_do_not_count_as_drawings() {
    let dir = fixture_dir("dirs");
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    let storage = FsStorage::new(&dir);
    assert!(!storage.exists("nested"));
}

#[test]
fn close_stops_reading() {
    let dir = fixture_dir("close");
    std::fs::write(dir.join("a.txt"), "one\ntwo\n").unwrap();

    let storage = FsStorage::new(&dir);
    let mut stream = storage.open("a.txt").unwrap();
    stream.close();
    assert!(!stream.available());
    assert_eq!(stream.read_line().unwrap(), None);
}

#[test]
fn opening_a_missing_file_fails() {
    let dir = fixture_dir("missing");
    let storage = FsStorage::new(&dir);
    assert!(storage.open("absent.txt").is_err());
}

#[test]
fn non_utf8_bytes_are_replaced_not_fatal() {
    let dir = fixture_dir("latin1_lines");
    std::fs::write(dir.join("L.TXT"), b"caf\xE9\r\nnext\n").unwrap();

    let storage = FsStorage::new(&dir);
    let mut stream = storage.open("L.TXT").unwrap();
    assert_eq!(stream.read_line().unwrap().as_deref(), Some("caf\u{FFFD}"));
    assert_eq!(stream.read_line().unwrap().as_deref(), Some("next"));
    assert_eq!(stream.read_line().unwrap(), None);
}

#[test]
fn latin1_drawing_still_plays() {
    use crate::color::catalog::PenColor;
    use crate::drawing::model::Waypoint;
    use crate::drawing::reader::DrawingReader;

    let dir = fixture_dir("latin1_drawing");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"DRAWING_INFO_START\nname = Caf\xE9\npointsCount = 3\nDRAWING_INFO_END\n");
    bytes.extend_from_slice(b"SETTINGS_START\nSETTINGS_END\nDRAWING_START\n");
    bytes.extend_from_slice(b"3 4 BLACK true \xE9\n");
    bytes.extend_from_slice(b"7\xE9 8 R\xE9D false\n");
    bytes.extend_from_slice(b"9 9 GREEN true\n");
    std::fs::write(dir.join("CAFE.TXT"), bytes).unwrap();

    let storage = FsStorage::new(&dir);
    let reader = DrawingReader::open(&storage, "CAFE.TXT").unwrap();
    assert_eq!(reader.metadata().name, "Caf\u{FFFD}");

    let reads: Vec<_> = reader.collect();
    assert_eq!(reads.len(), 3);
    assert!(reads.iter().all(|r| r.warnings.is_empty()));
    assert_eq!(reads[0].waypoint, Waypoint::new(3.0, 4.0, PenColor::Black, true));
    assert_eq!(reads[1].waypoint, Waypoint::new(7.0, 8.0, PenColor::None, false));
    assert_eq!(reads[2].waypoint, Waypoint::new(9.0, 9.0, PenColor::Green, true));
}
