use std::path::PathBuf;

pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Upload Image")
        .add_filter("Images", &["png", "jpg", "jpeg", "gif"])
        .pick_file()
}

pub fn pick_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Image")
        .add_filter("PNG", &["png"])
        .add_filter("All files", &["*"])
        .set_file_name("qrcode.png")
        .save_file()
}
