//! Máscara de entrada `__.__.____` para la fecha de expedición

pub const ISSUE_DATE_MASK: &str = "__.__.____";

/// Aplicar la máscara de fecha al texto tecleado
///
/// Solo se conservan los dígitos; los puntos se insertan cuando hay un
/// dígito que los sigue. El resultado puede ser parcial (`"01.0"`) y
/// nunca supera la longitud de la máscara.
pub fn apply_date_mask(input: &str) -> String {
    let mut masked = String::with_capacity(ISSUE_DATE_MASK.len());
    let mut digits = input.chars().filter(|c| c.is_ascii_digit()).peekable();

    for slot in ISSUE_DATE_MASK.chars() {
        if slot == '_' {
            match digits.next() {
                Some(digit) => masked.push(digit),
                None => break,
            }
        } else if digits.peek().is_some() {
            masked.push(slot);
        } else {
            break;
        }
    }

    masked
}
