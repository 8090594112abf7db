use crate::{
    api::{ApiError, NotesApi},
    dto::{CreateNoteRequest, UpdateNoteRequest},
    models::Note,
};

/// What the note list currently shows: the entries fetched from the server,
/// or the placeholder left behind by a failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Notes(Vec<Note>),
    LoadFailed,
}

/// The two input fields backing the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

/// What the submit action does: create a new note, or update the one the
/// form is currently bound to. At most one note is bound at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("please provide both a title and content")]
    EmptyDraft,

    #[error("no note at position {0}")]
    NoSuchEntry(usize),

    #[error(transparent)]
    Api(#[from] ApiError),
}

fn validate_draft(draft: &Draft) -> Result<(String, String), ClientError> {
    let title = draft.title.trim();
    let content = draft.content.trim();

    if title.is_empty() || content.is_empty() {
        return Err(ClientError::EmptyDraft);
    }

    Ok((title.to_string(), content.to_string()))
}

/// The client proper: a transient in-memory rendering of the server's note
/// set, patched after each mutation. The server owns the authoritative copy;
/// `load` rebuilds the list wholesale, the mutations patch single entries.
pub struct NotesClient {
    api: NotesApi,
    list: ListView,
    draft: Draft,
    mode: FormMode,
}

impl NotesClient {
    pub fn new(api: NotesApi) -> Self {
        Self {
            api,
            list: ListView::Notes(Vec::new()),
            draft: Draft::default(),
            mode: FormMode::Create,
        }
    }

    pub const fn view(&self) -> &ListView {
        &self.list
    }

    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_content(&mut self, content: String) {
        self.draft.content = content;
    }

    /// The note at a 1-based rendered position.
    pub fn entry_at(&self, position: usize) -> Result<&Note, ClientError> {
        let ListView::Notes(notes) = &self.list else {
            return Err(ClientError::NoSuchEntry(position));
        };

        position
            .checked_sub(1)
            .and_then(|i| notes.get(i))
            .ok_or(ClientError::NoSuchEntry(position))
    }

    /// Fetches the full collection and replaces the rendered list, keeping
    /// server order. On failure the list becomes the error placeholder.
    pub async fn load(&mut self) -> Result<usize, ClientError> {
        match self.api.get_all_notes().await {
            Ok(notes) => {
                let count = notes.len();
                self.list = ListView::Notes(notes);
                Ok(count)
            }
            Err(e) => {
                self.list = ListView::LoadFailed;
                Err(e.into())
            }
        }
    }

    /// Submits the draft. In create mode the returned note is inserted at the
    /// top of the list and the draft cleared; in edit mode the bound entry is
    /// replaced in place and the form reverts to create mode. An invalid
    /// draft aborts before any request; a failed request leaves the draft and
    /// mode untouched.
    pub async fn save(&mut self) -> Result<Saved, ClientError> {
        let (title, content) = validate_draft(&self.draft)?;

        match self.mode.clone() {
            FormMode::Create => {
                let note = self.api.create_note(&CreateNoteRequest { title, content }).await?;

                if let ListView::Notes(notes) = &mut self.list {
                    notes.insert(0, note);
                } else {
                    self.list = ListView::Notes(vec![note]);
                }
                self.draft = Draft::default();

                Ok(Saved::Created)
            }
            FormMode::Editing(id) => {
                let note = self
                    .api
                    .update_note(&id, &UpdateNoteRequest { title, content })
                    .await?;

                if let ListView::Notes(notes) = &mut self.list
                    && let Some(entry) = notes.iter_mut().find(|n| n.id == id)
                {
                    *entry = note;
                }
                self.draft = Draft::default();
                self.mode = FormMode::Create;

                Ok(Saved::Updated)
            }
        }
    }

    /// Enters edit mode bound to the note at the given rendered position:
    /// copies its fields into the draft and rebinds the submit action. A
    /// later call simply overwrites the binding.
    pub fn edit(&mut self, position: usize) -> Result<Note, ClientError> {
        let note = self.entry_at(position)?.clone();

        self.draft = Draft {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.mode = FormMode::Editing(note.id.clone());

        Ok(note)
    }

    /// Clears the draft and reverts the submit action to create.
    pub fn cancel(&mut self) {
        self.draft = Draft::default();
        self.mode = FormMode::Create;
    }

    /// Deletes the note at the given rendered position. Only the matching
    /// entry is removed; on failure the entry stays in place. Confirmation
    /// happens at the prompt, before this is called.
    pub async fn delete(&mut self, position: usize) -> Result<Note, ClientError> {
        let note = self.entry_at(position)?.clone();

        self.api.delete_note(&note.id).await?;

        if let ListView::Notes(notes) = &mut self.list {
            notes.retain(|n| n.id != note.id);
        }

        Ok(note)
    }
}
