//! Structural checks over the repository layout
