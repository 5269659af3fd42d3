//! Gerador de nomes/senhas curtos
//!
//! O alfabeto exclui caracteres ambíguos (0/O, 1/I/l) para que o nome possa
//! ser copiado à mão. A saída também serve de senha do link compartilhado,
//! por isso a fonte é o CSPRNG do sistema operacional.

use rand::rngs::OsRng;
use rand::Rng;

/// 57 caracteres: dígitos 2-9, maiúsculas sem I/O, minúsculas sem l
pub const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Gera `length` caracteres sorteados uniformemente do [`ALPHABET`]
///
/// Não há garantia de unicidade entre chamadas.
pub fn generate(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_57_unambiguous_chars() {
        assert_eq!(ALPHABET.len(), 57);

        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 57);

        for ambiguous in [b'0', b'1', b'O', b'I', b'l'] {
            assert!(!ALPHABET.contains(&ambiguous));
        }
    }

    #[test]
    fn test_generate_length_and_charset() {
        for n in 1..=64 {
            let value = generate(n);
            assert_eq!(value.chars().count(), n);
            assert!(value.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_zero_length() {
        assert_eq!(generate(0), "");
    }

    #[test]
    fn test_consecutive_values_differ() {
        // 57^8 combinações: colisão em 1000 sorteios é desprezível
        let values: HashSet<String> = (0..1000).map(|_| generate(8)).collect();
        assert_eq!(values.len(), 1000);
    }

    #[test]
    fn test_characters_roughly_uniform() {
        let sample = generate(57 * 400);
        let mut counts = [0usize; 256];
        for b in sample.bytes() {
            counts[b as usize] += 1;
        }

        // Esperado 400 por caractere; limites largos para não gerar falso negativo
        for &c in ALPHABET {
            let count = counts[c as usize];
            assert!(count > 250 && count < 550, "char {} appeared {} times", c as char, count);
        }
    }
}
