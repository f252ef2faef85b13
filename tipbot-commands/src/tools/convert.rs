use tipbot_utils::{
    numbers::{
        ConversionError, PrimeCheck, check_prime, decimal_to_hex, hex_to_decimal, hex_to_text,
        strip_thousands_separators, text_to_hex,
    },
    reactions::{EMOJI_CHECKMARK, EMOJI_ERROR, EMOJI_OK_BOX, EMOJI_OK_HAND},
};

use super::Outcome;

const PRIME_MAX_LEN: usize = 2000;
const DEC2HEX_MAX_LEN: usize = 32;
const HEX2DEC_MAX_LEN: usize = 100;
const HEX_TEXT_MAX_LEN: usize = 1000;

fn too_long(mention: &str, input: &str) -> Outcome {
    Outcome::reply(EMOJI_ERROR, format!("{mention} **{input}** too long."))
}

pub(super) fn prime(mention: &str, raw: &str) -> Outcome {
    let number = strip_thousands_separators(raw);
    if number.len() >= PRIME_MAX_LEN {
        return too_long(mention, &number);
    }

    match check_prime(&number) {
        PrimeCheck::Prime => Outcome::react(EMOJI_CHECKMARK),
        PrimeCheck::Composite | PrimeCheck::Invalid => Outcome::react(EMOJI_ERROR),
    }
}

pub(super) fn dec2hex(mention: &str, raw: &str) -> Outcome {
    let decimal = strip_thousands_separators(raw);
    if decimal.len() >= DEC2HEX_MAX_LEN {
        return too_long(mention, &decimal);
    }

    match decimal_to_hex(&decimal) {
        Ok(value) => Outcome::reply(
            EMOJI_OK_HAND,
            format!("{mention} decimal of **{decimal}** is equal to hex:```{value}```"),
        )
        .acknowledged(EMOJI_OK_BOX),
        Err(_) => Outcome::reply(
            EMOJI_ERROR,
            format!("{mention} **{decimal}** is an invalid decimal / integer."),
        ),
    }
}

pub(super) fn hex2dec(mention: &str, hex: &str) -> Outcome {
    if hex.len() >= HEX2DEC_MAX_LEN {
        return too_long(mention, hex);
    }

    match hex_to_decimal(hex) {
        Ok(value) => Outcome::reply(
            EMOJI_OK_HAND,
            format!("{mention} hex of **{hex}** is equal to decimal:```{value}```"),
        )
        .acknowledged(EMOJI_OK_BOX),
        Err(_) => Outcome::reply(EMOJI_ERROR, format!("{mention} **{hex}** is an invalid hex.")),
    }
}

pub(super) fn hex2str(mention: &str, hex: &str) -> Outcome {
    if hex.len() >= HEX_TEXT_MAX_LEN {
        return too_long(mention, hex);
    }

    match hex_to_text(hex) {
        Ok(text) => Outcome::reply(
            EMOJI_OK_HAND,
            format!("{mention} hex of **{hex}** in ascii is:```{text}```"),
        )
        .acknowledged(EMOJI_OK_BOX),
        Err(ConversionError::Undecodable) => {
            Outcome::reply(EMOJI_ERROR, format!("{mention} **{hex}** I can not decode."))
        }
        Err(_) => Outcome::reply(EMOJI_ERROR, format!("{mention} **{hex}** is an invalid hex.")),
    }
}

pub(super) fn str2hex(mention: &str, text: &str) -> Outcome {
    if text.len() >= HEX_TEXT_MAX_LEN {
        return too_long(mention, text);
    }
    if !text.is_ascii() {
        return Outcome::reply(EMOJI_ERROR, format!("{mention} **{text}** is not valid ascii."));
    }

    Outcome::reply(
        EMOJI_OK_HAND,
        format!("{mention} ascii of **{text}** in hex is:```{}```", text_to_hex(text)),
    )
    .acknowledged(EMOJI_OK_BOX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "<@1>";

    #[test]
    fn prime_reacts_only() {
        assert_eq!(prime(ME, "1,000,000,007"), Outcome::react(EMOJI_CHECKMARK));
        assert_eq!(prime(ME, "1,000,000,008"), Outcome::react(EMOJI_ERROR));
        assert_eq!(prime(ME, "twelve"), Outcome::react(EMOJI_ERROR));
    }

    #[test]
    fn prime_length_is_the_only_cap() {
        let long = "1".repeat(PRIME_MAX_LEN);
        let outcome = prime(ME, &long);
        assert_eq!(outcome.reaction, Some(EMOJI_ERROR));
        assert!(outcome.reply.is_some_and(|reply| reply.ends_with("too long.")));

        // 2^89 - 1
        assert_eq!(
            prime(ME, "618,970,019,642,690,137,449,562,111"),
            Outcome::react(EMOJI_CHECKMARK)
        );
        assert_eq!(
            prime(ME, "123456789012345678901234567890"),
            Outcome::react(EMOJI_ERROR)
        );
    }

    #[test]
    fn dec2hex_replies_with_hex() {
        let outcome = dec2hex(ME, "65,535");
        assert_eq!(outcome.reaction, Some(EMOJI_OK_HAND));
        assert_eq!(outcome.reply_reaction, Some(EMOJI_OK_BOX));
        assert_eq!(
            outcome.reply.as_deref(),
            Some("<@1> decimal of **65535** is equal to hex:```0xffff```")
        );

        let invalid = dec2hex(ME, "0xff");
        assert_eq!(
            invalid.reply.as_deref(),
            Some("<@1> **0xff** is an invalid decimal / integer.")
        );
        assert_eq!(invalid.reply_reaction, None);

        let long = dec2hex(ME, &"9".repeat(DEC2HEX_MAX_LEN));
        assert!(long.reply.is_some_and(|reply| reply.ends_with("too long.")));
    }

    #[test]
    fn hex2dec_handles_prefix() {
        let outcome = hex2dec(ME, "0xFF");
        assert_eq!(
            outcome.reply.as_deref(),
            Some("<@1> hex of **0xFF** is equal to decimal:```255```")
        );
        assert_eq!(
            hex2dec(ME, "0xZZ").reply.as_deref(),
            Some("<@1> **0xZZ** is an invalid hex.")
        );
    }

    #[test]
    fn hex_and_text() {
        assert_eq!(
            hex2str(ME, "4869").reply.as_deref(),
            Some("<@1> hex of **4869** in ascii is:```Hi```")
        );
        assert_eq!(
            hex2str(ME, "c3").reply.as_deref(),
            Some("<@1> **c3** I can not decode.")
        );
        assert_eq!(
            str2hex(ME, "Hi there").reply.as_deref(),
            Some("<@1> ascii of **Hi there** in hex is:```4869207468657265```")
        );
        assert_eq!(
            str2hex(ME, "héllo").reply.as_deref(),
            Some("<@1> **héllo** is not valid ascii.")
        );
    }
}
