//! Controladores
//!
//! Este módulo conecta el formulario con la terminal.

pub mod form_controller;
