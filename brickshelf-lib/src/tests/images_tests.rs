use super::*;

#[test]
fn extension_is_checked_case_insensitively() {
    assert_eq!(image_extension("box.JPG").unwrap(), "jpg");
    assert_eq!(image_extension("box.Png").unwrap(), "png");
    assert_eq!(image_extension("box.webp").unwrap(), "webp");
    assert!(matches!(
        image_extension("box.bmp"),
        Err(ImageError::UnsupportedExtension(ref e)) if e == "bmp"
    ));
    assert!(image_extension("notes.txt.exe").is_err());
}

#[test]
fn missing_extension_defaults_to_jpg() {
    assert_eq!(image_extension("photo").unwrap(), "jpg");
}

#[test]
fn sanitize_replaces_unsafe_characters() {
    assert_eq!(sanitize_filename("75192"), "75192");
    assert_eq!(sanitize_filename("10/20 a:b*c?d\"e<f>g|h\\i"), "10_20_a_b_c_d_e_f_g_h_i");
}

#[test]
fn stored_name_combines_id_and_set_number() {
    let name = stored_image_name("front.PNG", "abc-123", "NCC 1701").unwrap();
    assert_eq!(name, "abc-123_NCC_1701.png");
}

#[test]
fn save_and_delete_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(tmp.path().join("images"));

    let name = store.save(b"not really a jpeg", "box.jpg", "id1", "75192").unwrap();
    assert_eq!(name, "id1_75192.jpg");

    let path = store.image_path(&name).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"not really a jpeg");
    // No temp file left behind
    assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 1);

    store.delete(&name).unwrap();
    assert!(!path.exists());
}

#[test]
fn delete_missing_file_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(tmp.path());
    store.delete("never_saved.png").unwrap();
    store.delete("").unwrap();
}

#[test]
fn rejected_extension_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(tmp.path().join("images"));
    assert!(store.save(b"MZ", "setup.exe", "id1", "75192").is_err());
    assert!(!store.dir().exists());
}

#[test]
fn empty_name_has_no_path() {
    let store = DiskImageStore::new("/images");
    assert_eq!(store.image_path(""), None);
    assert_eq!(store.image_path("a.jpg"), Some(PathBuf::from("/images/a.jpg")));
}
