/// Utility function to ensure output directories exist when needed
pub fn ensure_dir_exists<P: AsRef<std::path::Path>>(path: &P) -> std::io::Result<()> {
    let p = path.as_ref();
    if p.exists() {
        if p.is_dir() {
            tracing::debug!(path = ?p, "exists");
            Ok(())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("not a directory: {}", p.display()),
            ))
        }
    } else {
        tracing::debug!(path = ?p, "creating");
        std::fs::create_dir_all(p)
    }
}
