/// User-level actions produced by mapping terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Tick,
    Quit,
    Resize(u16, u16),

    // Navigation
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    DrillIn,
    NavigateBack,
    CycleFocus,

    // Study actions
    CycleAction,
    Submit,
    EditNote,
    ReloadDocuments,
    AddFiles,
    ToggleSelect,
    ToggleHelp,

    // Note input mode
    NoteInput(char),
    NoteConfirm,
    NoteCancel,

    // Mouse-driven selection over the page area
    PressAt(u16, u16),
    DragAt(u16, u16),
    ReleaseAt(u16, u16),
}
