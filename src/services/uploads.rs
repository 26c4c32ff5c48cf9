//! # 업로드 파일 I/O 서비스
//!
//! 사용자 프로필 이미지를 `UPLOADS_PATH/profiles/` 아래에 저장합니다.
//! 저장된 파일은 `/public/profiles/{파일명}`으로 서빙됩니다.
//!
//! 이 모듈의 함수들:
//! - `image_extension()`: 업로드 파일명에서 허용된 이미지 확장자 추출
//! - `save_profile_image()`: 바이트를 새 파일명으로 디스크에 저장
//! - `remove_profile_image()`: 더 이상 참조되지 않는 프로필 이미지 삭제

use crate::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 업로드 루트 아래의 프로필 이미지 디렉토리
pub const PROFILE_DIR: &str = "profiles";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// 업로드된 파일명에서 소문자 확장자를 꺼냅니다.
///
/// 이미지 확장자가 아니면 `None`입니다.
///
/// # 예시
/// ```
/// use blog_backend::services::image_extension;
///
/// assert_eq!(image_extension("Me.PNG").as_deref(), Some("png"));
/// assert_eq!(image_extension("notes.txt"), None);
/// ```
pub fn image_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();

    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// 프로필 이미지를 저장하고 저장된 파일명을 반환합니다.
///
/// 파일명은 UUIDv7로 새로 만들어 클라이언트가 보낸 이름(경로 포함 가능)을
/// 디스크 경로에 쓰지 않습니다.
pub async fn save_profile_image(
    uploads_path: &str,
    extension: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let file_name = format!("{}.{}", uuid::Uuid::now_v7(), extension);
    let dir = PathBuf::from(uploads_path).join(PROFILE_DIR);

    // 디렉토리가 없으면 중간 디렉토리까지 생성
    fs::create_dir_all(&dir).await?;
    fs::write(dir.join(&file_name), bytes).await?;

    Ok(file_name)
}

/// 프로필 이미지 파일을 삭제합니다.
///
/// 이미 없는 파일은 무시하고, 그 밖의 실패는 경고 로그만 남깁니다.
/// 이미지 삭제 실패로 요청 자체를 실패시키지는 않습니다.
pub async fn remove_profile_image(uploads_path: &str, file_name: &str) {
    // 파일명 부분만 사용합니다 ("../x.png" 같은 값은 디렉토리 밖을 가리키지 못함)
    let Some(name) = Path::new(file_name).file_name() else {
        return;
    };
    let path = PathBuf::from(uploads_path).join(PROFILE_DIR).join(name);

    match fs::remove_file(&path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed profile image"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove profile image")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_extensions_are_accepted() {
        assert_eq!(image_extension("me.png").as_deref(), Some("png"));
        assert_eq!(image_extension("Me.JPEG").as_deref(), Some("jpeg"));
        assert_eq!(image_extension("anim.webp").as_deref(), Some("webp"));
        assert_eq!(image_extension("notes.txt"), None);
        assert_eq!(image_extension("no-extension"), None);
        assert_eq!(image_extension(""), None);
    }

    #[tokio::test]
    async fn saves_image_under_profile_dir() {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().to_str().unwrap();

        let file_name = save_profile_image(uploads, "png", b"\x89PNG").await.unwrap();

        assert!(file_name.ends_with(".png"));
        let stored = tokio::fs::read(root.path().join(PROFILE_DIR).join(&file_name))
            .await
            .unwrap();
        assert_eq!(stored, b"\x89PNG");
    }

    #[tokio::test]
    async fn removes_stored_image_and_ignores_missing_ones() {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().to_str().unwrap();

        let file_name = save_profile_image(uploads, "gif", b"GIF89a").await.unwrap();
        let stored = root.path().join(PROFILE_DIR).join(&file_name);
        assert!(stored.exists());

        remove_profile_image(uploads, &file_name).await;
        assert!(!stored.exists());

        // 두 번째 삭제와 디렉토리 밖을 가리키는 이름은 조용히 무시됩니다
        remove_profile_image(uploads, &file_name).await;
        remove_profile_image(uploads, "..").await;
        assert!(root.path().exists());
    }
}
