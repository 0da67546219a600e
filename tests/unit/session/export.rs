use super::*;

#[test]
fn filename_embeds_digits_only_timestamp() {
    assert_eq!(
        export_filename("fukuwarai", 1_792_314_307),
        "fukuwarai-20261018090507.png"
    );
    let name = export_filename("x", unix_now());
    let digits = &name[2..name.len() - 4];
    assert_eq!(digits.len(), 14);
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn directories_get_timestamped_names() {
    let dir = PathBuf::from("target").join("export_unit");
    std::fs::create_dir_all(&dir).unwrap();
    assert_eq!(
        resolve_export_path(&dir, "p", 0),
        dir.join("p-19700101000000.png")
    );
    let file = dir.join("explicit.png");
    assert_eq!(resolve_export_path(&file, "p", 0), file);
}

#[test]
fn write_png_creates_parents() {
    let path = PathBuf::from("target")
        .join("export_unit")
        .join("nested")
        .join("out.png");
    let _ = std::fs::remove_file(&path);
    let snap = Snapshot {
        width: 1,
        height: 1,
        png: vec![1, 2, 3],
    };
    write_png(&path, &snap).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
}
