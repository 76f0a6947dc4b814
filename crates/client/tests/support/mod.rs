//! In-memory collaborator fake driving the session and browsing tests

use async_trait::async_trait;
use chrono::Utc;
use noteshare_core::errors::{AppError, Result};
use noteshare_core::models::note::generate_thumbnail;
use noteshare_core::models::{
    Account, Class, FeaturedFilter, FileKind, Note, NoteFilters, PlatformStats, Stream,
    University, UniversityStats, UserStats,
};
use noteshare_core::upload::ValidatedUpload;
use noteshare_core::INITIAL_CREDITS;
use noteshare_client::api::{
    AuthResponse, DownloadReceipt, LoginRequest, NotesApi, RegisterRequest, UploadReceipt,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Route test logs through the capture writer; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct FakeState {
    pub account: Account,
    pub token_valid: bool,
    pub notes: Vec<Note>,
    pub fail_upload: bool,
}

/// Collaborator fake: owns the server-side account balance and note list
pub struct FakeApi {
    pub state: Mutex<FakeState>,
    pub download_calls: AtomicU64,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_credits(INITIAL_CREDITS)
    }

    pub fn with_credits(credits: u32) -> Self {
        init_tracing();
        Self {
            state: Mutex::new(FakeState {
                account: Account {
                    id: Some("acct-1".into()),
                    name: "Priya".into(),
                    email: "priya@example.edu".into(),
                    university: "IIT Delhi".into(),
                    credits,
                },
                token_valid: true,
                notes: Vec::new(),
                fail_upload: false,
            }),
            download_calls: AtomicU64::new(0),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn seed_note(&self, subject: &str, university: &str, downloads: u64) -> Note {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let note = Note {
            id: format!("note-{id}"),
            title: format!("{subject} notes"),
            university: university.into(),
            stream: "Engineering".into(),
            class: "First Year".into(),
            subject: subject.into(),
            description: String::new(),
            uploaded_by: None,
            uploader_name: "Ravi".into(),
            file_name: "notes.pdf".into(),
            file_path: Some(format!("/files/note-{id}.pdf")),
            file_type: FileKind::Document,
            file_size: Some(1024),
            pages: 24,
            thumbnail: generate_thumbnail("notes.pdf", FileKind::Document),
            downloads,
            upload_date: Utc::now(),
        };
        self.state.lock().unwrap().notes.push(note.clone());
        note
    }

    pub fn set_fail_upload(&self, fail: bool) {
        self.state.lock().unwrap().fail_upload = fail;
    }

    pub fn expire_token(&self) {
        self.state.lock().unwrap().token_valid = false;
    }

    pub fn server_credits(&self) -> u32 {
        self.state.lock().unwrap().account.credits
    }

    pub fn user_uploads_len(&self) -> usize {
        let state = self.state.lock().unwrap();
        state
            .notes
            .iter()
            .filter(|n| n.uploaded_by == state.account.id)
            .count()
    }

    pub fn list_notes_unfiltered(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }

    pub fn note_downloads(&self, note_id: &str) -> u64 {
        self.state
            .lock()
            .unwrap()
            .notes
            .iter()
            .find(|n| n.id == note_id)
            .map(|n| n.downloads)
            .unwrap_or(0)
    }
}

#[async_trait]
impl NotesApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let mut state = self.state.lock().unwrap();
        state.account = Account {
            id: Some("acct-1".into()),
            name: request.name.clone(),
            email: request.email.clone(),
            university: request.university.clone(),
            credits: INITIAL_CREDITS,
        };
        state.token_valid = true;
        Ok(AuthResponse {
            token: "tok-1".into(),
            user: state.account.clone(),
            message: "Account created successfully!".into(),
        })
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse> {
        let mut state = self.state.lock().unwrap();
        state.token_valid = true;
        Ok(AuthResponse {
            token: "tok-1".into(),
            user: state.account.clone(),
            message: "Login successful!".into(),
        })
    }

    async fn current_account(&self) -> Result<Account> {
        let state = self.state.lock().unwrap();
        if !state.token_valid {
            return Err(AppError::SessionExpired);
        }
        Ok(state.account.clone())
    }

    async fn list_universities(&self) -> Result<Vec<University>> {
        Ok(vec![
            University {
                id: Some("u1".into()),
                name: "IIT Delhi".into(),
                streams: vec![Stream {
                    id: Some(1),
                    name: "Engineering".into(),
                    classes: vec![Class {
                        id: Some(1),
                        name: "First Year".into(),
                        subjects: vec!["Physics".into(), "Chemistry".into()],
                    }],
                }],
            },
            University {
                id: Some("u2".into()),
                name: "Delhi University".into(),
                streams: vec![],
            },
        ])
    }

    async fn create_university(&self, name: &str) -> Result<University> {
        Ok(University {
            id: Some("u-new".into()),
            name: name.into(),
            streams: vec![],
        })
    }

    async fn add_stream(&self, _university_id: &str, stream_name: &str) -> Result<University> {
        Ok(University {
            id: Some("u1".into()),
            name: "IIT Delhi".into(),
            streams: vec![Stream {
                id: Some(99),
                name: stream_name.into(),
                classes: vec![],
            }],
        })
    }

    async fn list_notes(&self, filters: &NoteFilters) -> Result<Vec<Note>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .notes
            .iter()
            .filter(|n| {
                filters
                    .university
                    .as_deref()
                    .map_or(true, |u| n.university == u)
            })
            .cloned()
            .collect())
    }

    async fn get_note(&self, note_id: &str) -> Result<Note> {
        let state = self.state.lock().unwrap();
        state
            .notes
            .iter()
            .find(|n| n.id == note_id)
            .cloned()
            .ok_or_else(|| AppError::NoteNotFound {
                id: note_id.into(),
            })
    }

    async fn upload_note(&self, upload: &ValidatedUpload) -> Result<UploadReceipt> {
        let mut state = self.state.lock().unwrap();
        if state.fail_upload {
            // Simulated storage failure: no note persisted, no credit granted
            return Err(AppError::Rejected {
                message: "Storage failure".into(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let note = Note {
            id: format!("note-{id}"),
            title: upload.title.clone(),
            university: upload.university.clone(),
            stream: upload.stream.clone(),
            class: upload.class.clone(),
            subject: upload.subject.clone(),
            description: upload.description.clone(),
            uploaded_by: state.account.id.clone(),
            uploader_name: state.account.name.clone(),
            file_name: upload.file_name.clone(),
            file_path: Some(format!("/files/note-{id}.pdf")),
            file_type: upload.file_kind,
            file_size: Some(upload.file.len() as u64),
            pages: 12,
            thumbnail: upload.thumbnail.clone(),
            downloads: 0,
            upload_date: Utc::now(),
        };
        state.notes.push(note.clone());
        state.account.credits += 1;

        Ok(UploadReceipt {
            message: "Notes uploaded successfully!".into(),
            note,
            credits: state.account.credits,
        })
    }

    async fn download_note(&self, note_id: &str) -> Result<DownloadReceipt> {
        self.download_calls.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.lock().unwrap();
        if !state.token_valid {
            return Err(AppError::SessionExpired);
        }
        if state.account.credits == 0 {
            return Err(AppError::Rejected {
                message: "Insufficient credits. Upload notes to earn more!".into(),
            });
        }

        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or_else(|| AppError::NoteNotFound {
                id: note_id.into(),
            })?;
        note.downloads += 1;
        let file_path = note.file_path.clone();
        state.account.credits -= 1;

        Ok(DownloadReceipt {
            message: "Download successful!".into(),
            credits: state.account.credits,
            file_path: file_path.clone(),
            download_url: file_path,
        })
    }

    async fn delete_note(&self, note_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.notes.retain(|n| n.id != note_id);
        Ok(())
    }

    async fn user_uploads(&self) -> Result<Vec<Note>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .notes
            .iter()
            .filter(|n| n.uploaded_by == state.account.id)
            .cloned()
            .collect())
    }

    async fn user_downloads(&self) -> Result<Vec<Note>> {
        Ok(Vec::new())
    }

    async fn user_stats(&self) -> Result<UserStats> {
        Ok(UserStats::default())
    }

    async fn featured_notes(&self, _filter: FeaturedFilter, limit: u32) -> Result<Vec<Note>> {
        let state = self.state.lock().unwrap();
        let mut notes = state.notes.clone();
        notes.sort_by(|a, b| b.downloads.cmp(&a.downloads));
        notes.truncate(limit as usize);
        Ok(notes)
    }

    async fn university_stats(&self, university: &str) -> Result<UniversityStats> {
        let state = self.state.lock().unwrap();
        let total_notes = state
            .notes
            .iter()
            .filter(|n| n.university == university)
            .count() as u64;
        Ok(UniversityStats {
            university: university.into(),
            total_notes,
            total_downloads: state.notes.iter().map(|n| n.downloads).sum(),
            total_streams: 1,
            total_subjects: 2,
        })
    }

    async fn platform_stats(&self) -> Result<PlatformStats> {
        let state = self.state.lock().unwrap();
        Ok(PlatformStats {
            total_users: 1,
            total_notes: state.notes.len() as u64,
            total_universities: 2,
            total_downloads: state.notes.iter().map(|n| n.downloads).sum(),
        })
    }
}
