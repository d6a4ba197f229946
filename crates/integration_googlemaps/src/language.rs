//! Result languages supported by the Maps web services

use crate::tokens::token_enum;

token_enum! {
    /// Language in which results are returned
    ///
    /// Regional variants (`en-GB`, `pt-BR`, `zh-TW`, ...) are separate
    /// variants because the remote API treats them as distinct tokens.
    pub enum Language {
        Arabic => "ar",
        Belarusian => "be",
        Bulgarian => "bg",
        Bengali => "bn",
        Catalan => "ca",
        Czech => "cs",
        Danish => "da",
        German => "de",
        Greek => "el",
        English => "en",
        EnglishAustralian => "en-AU",
        EnglishBritish => "en-GB",
        Spanish => "es",
        Basque => "eu",
        Farsi => "fa",
        Finnish => "fi",
        Filipino => "fil",
        French => "fr",
        Galician => "gl",
        Gujarati => "gu",
        Hindi => "hi",
        Croatian => "hr",
        Hungarian => "hu",
        Indonesian => "id",
        Italian => "it",
        Hebrew => "iw",
        Japanese => "ja",
        Kazakh => "kk",
        Kannada => "kn",
        Korean => "ko",
        Kyrgyz => "ky",
        Lithuanian => "lt",
        Latvian => "lv",
        Macedonian => "mk",
        Malayalam => "ml",
        Marathi => "mr",
        Burmese => "my",
        Dutch => "nl",
        Norwegian => "no",
        Punjabi => "pa",
        Polish => "pl",
        Portuguese => "pt",
        PortugueseBrazil => "pt-BR",
        PortuguesePortugal => "pt-PT",
        Romanian => "ro",
        Russian => "ru",
        Slovak => "sk",
        Slovenian => "sl",
        Albanian => "sq",
        Serbian => "sr",
        Swedish => "sv",
        Tamil => "ta",
        Telugu => "te",
        Thai => "th",
        Tagalog => "tl",
        Turkish => "tr",
        Ukrainian => "uk",
        Uzbek => "uz",
        Vietnamese => "vi",
        ChineseSimplified => "zh-CN",
        ChineseTraditional => "zh-TW",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_is_bijective() {
        let variants: HashSet<_> = Language::TABLE.iter().map(|(v, _)| *v).collect();
        let tokens: HashSet<_> = Language::TABLE.iter().map(|(_, t)| *t).collect();
        assert_eq!(variants.len(), Language::TABLE.len());
        assert_eq!(tokens.len(), Language::TABLE.len());
    }

    #[test]
    fn regional_variants_keep_their_casing() {
        assert_eq!(Language::EnglishBritish.as_str(), "en-GB");
        assert_eq!(Language::ChineseTraditional.as_str(), "zh-TW");
        assert_eq!("pt-BR".parse::<Language>().unwrap(), Language::PortugueseBrazil);
        assert!("pt-br".parse::<Language>().is_err());
    }

    #[test]
    fn hebrew_uses_legacy_code() {
        assert_eq!(Language::Hebrew.as_str(), "iw");
    }
}
