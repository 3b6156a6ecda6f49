use rand::seq::SliceRandom;
use rand::Rng;

/// A timed test configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PracticeMode {
    pub id: &'static str,
    pub name: &'static str,
    pub full_name: &'static str,
    pub duration_secs: u32,
}

/// An untimed key drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub id: u32,
    pub name: &'static str,
    pub keys: &'static str,
    pub text: &'static str,
}

pub const PRACTICE_MODES: [PracticeMode; 4] = [
    PracticeMode {
        id: "time15",
        name: "15s",
        full_name: "15 seconds",
        duration_secs: 15,
    },
    PracticeMode {
        id: "time30",
        name: "30s",
        full_name: "30 seconds",
        duration_secs: 30,
    },
    PracticeMode {
        id: "time60",
        name: "1m",
        full_name: "1 minute",
        duration_secs: 60,
    },
    PracticeMode {
        id: "time120",
        name: "2m",
        full_name: "2 minutes",
        duration_secs: 120,
    },
];

pub const LESSONS: [Lesson; 6] = [
    Lesson {
        id: 1,
        name: "Home Row",
        keys: "asdfjkl;",
        text: "aaa sss ddd fff jjj kkk lll ;;; asdf jkl; sad lad fad jak las",
    },
    Lesson {
        id: 2,
        name: "Top Row",
        keys: "qwertyuiop",
        text: "qqq www eee rrr ttt yyy uuu iii ooo ppp qwer tyui op quit rope tire",
    },
    Lesson {
        id: 3,
        name: "Bottom Row",
        keys: "zxcvbnm",
        text: "zzz xxx ccc vvv bbb nnn mmm zxcv bnm zoo box can van ban man",
    },
    Lesson {
        id: 4,
        name: "Numbers",
        keys: "1234567890",
        text: "111 222 333 444 555 666 777 888 999 000 123 456 789 1234 5678",
    },
    Lesson {
        id: 5,
        name: "Symbols",
        keys: "!@#$%^&*()",
        text: "!!! @@@ ### $$$ %%% ^^^ &&& *** ((( ))) !@# $%^ &*( hello! world@",
    },
    Lesson {
        id: 6,
        name: "All Keys",
        keys: "full",
        text: "The quick brown fox jumps over the lazy dog near the riverbank today.",
    },
];

pub const QUOTES: [&str; 20] = [
    "The only way to do great work is to love what you do. If you haven't found it yet, keep looking. Don't settle.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "Innovation distinguishes between a leader and a follower.",
    "Your time is limited, so don't waste it living someone else's life.",
    "The future belongs to those who believe in the beauty of their dreams.",
    "Believe you can and you're halfway there.",
    "It does not matter how slowly you go as long as you do not stop.",
    "Everything you've ever wanted is on the other side of fear.",
    "Perfection is not attainable, but if we chase perfection we can catch excellence.",
    "The only impossible journey is the one you never begin.",
    "In the middle of difficulty lies opportunity.",
    "The best time to plant a tree was twenty years ago. The second best time is now.",
    "Life is what happens when you're busy making other plans.",
    "The greatest glory in living lies not in never falling, but in rising every time we fall.",
    "The way to get started is to quit talking and begin doing.",
    "Don't watch the clock; do what it does. Keep going.",
    "The future depends on what you do today.",
    "It is during our darkest moments that we must focus to see the light.",
    "You must be the change you wish to see in the world.",
    "Do not go where the path may lead, go instead where there is no path and leave a trail.",
];

pub fn find_mode(id: &str) -> Option<PracticeMode> {
    PRACTICE_MODES.iter().copied().find(|m| m.id == id)
}

pub fn find_lesson(id: u32) -> Option<Lesson> {
    LESSONS.iter().copied().find(|l| l.id == id)
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_find_mode() {
        let mode = find_mode("time15").unwrap();
        assert_eq!(mode.full_name, "15 seconds");
        assert_eq!(mode.duration_secs, 15);
        assert_eq!(find_mode("time120").unwrap().full_name, "2 minutes");
        assert!(find_mode("time5").is_none());
    }

    #[test]
    fn test_find_lesson() {
        assert_eq!(find_lesson(1).unwrap().name, "Home Row");
        assert_eq!(find_lesson(6).unwrap().name, "All Keys");
        assert!(find_lesson(0).is_none());
        assert!(find_lesson(7).is_none());
    }

    #[test]
    fn test_catalog_texts_are_not_empty() {
        assert!(LESSONS.iter().all(|l| !l.text.is_empty()));
        assert!(QUOTES.iter().all(|q| !q.is_empty()));
    }

    #[test]
    fn test_random_quote_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let quote = random_quote(&mut rng);
            assert!(QUOTES.contains(&quote));
        }
    }
}
