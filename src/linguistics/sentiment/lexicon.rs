//! Valence lexicon, booster words and negations for the sentiment scorer.
//!
//! Valences range from -4 (extremely negative) to +4 (extremely positive).
//! The list is weighted toward the vocabulary of abusive and casual posts.

/// Word valences.
pub const VALENCES: &[(&str, f64)] = &[
    // Positive
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("like", 2.0),
    ("likes", 1.8),
    ("liked", 1.8),
    ("good", 1.9),
    ("great", 3.1),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("excellent", 2.7),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("beautiful", 2.9),
    ("pretty", 2.2),
    ("cute", 2.0),
    ("nice", 1.8),
    ("happy", 2.7),
    ("glad", 2.0),
    ("fun", 2.3),
    ("funny", 1.9),
    ("haha", 2.0),
    ("lol", 1.8),
    ("lmao", 2.0),
    ("lmfao", 2.0),
    ("best", 3.2),
    ("better", 1.9),
    ("win", 2.8),
    ("won", 2.7),
    ("winning", 2.4),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("please", 1.3),
    ("smile", 1.5),
    ("laugh", 2.6),
    ("cool", 1.3),
    ("friend", 2.2),
    ("friends", 2.1),
    ("kind", 2.4),
    ("sweet", 2.0),
    ("perfect", 2.7),
    ("proud", 2.1),
    ("respect", 2.1),
    ("support", 1.7),
    ("free", 2.3),
    ("hope", 1.9),
    ("blessed", 2.9),
    ("bless", 1.8),
    ("yay", 2.4),
    ("yes", 1.7),
    ("ok", 1.2),
    ("okay", 0.9),
    ("well", 1.1),
    ("fine", 0.8),
    ("care", 2.2),
    ("safe", 1.9),
    ("peace", 2.5),
    ("enjoy", 2.2),
    ("excited", 1.4),
    ("favorite", 2.0),
    ("hero", 2.6),
    ("honest", 2.3),
    ("hug", 2.1),
    ("joy", 2.8),
    ("lucky", 1.8),
    ("super", 2.9),
    ("true", 1.8),
    ("trust", 2.3),
    ("wow", 2.8),
    ("yeah", 1.2),
    ("agree", 1.5),
    ("brilliant", 2.8),
    ("celebrate", 2.7),
    ("clean", 1.7),
    ("easy", 1.9),
    ("fresh", 1.3),
    ("gorgeous", 3.0),
    ("heaven", 2.3),
    ("interesting", 1.7),
    ("legend", 1.9),
    ("sexy", 2.4),
    ("strong", 2.3),
    ("welcome", 2.0),
    ("worth", 0.9),
    // Negative
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("hater", -1.8),
    ("haters", -2.2),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("ugly", -2.3),
    ("stupid", -2.4),
    ("dumb", -2.3),
    ("idiot", -2.3),
    ("idiots", -2.6),
    ("moron", -2.2),
    ("retard", -2.4),
    ("retarded", -2.7),
    ("fool", -1.9),
    ("loser", -2.4),
    ("trash", -1.5),
    ("garbage", -1.8),
    ("shit", -2.6),
    ("shitty", -2.6),
    ("bullshit", -2.8),
    ("crap", -1.6),
    ("damn", -1.7),
    ("damned", -1.6),
    ("hell", -3.6),
    ("fuck", -2.5),
    ("fucked", -3.4),
    ("fucking", -1.8),
    ("fucks", -2.1),
    ("fucker", -3.3),
    ("motherfucker", -3.6),
    ("bitch", -2.8),
    ("bitches", -2.9),
    ("bitching", -1.6),
    ("bitchy", -2.6),
    ("ass", -2.5),
    ("asshole", -2.5),
    ("dick", -2.3),
    ("dickhead", -3.1),
    ("pussy", -1.8),
    ("whore", -3.3),
    ("slut", -2.8),
    ("hoe", -2.2),
    ("hoes", -2.2),
    ("cunt", -2.2),
    ("bastard", -2.5),
    ("piss", -1.7),
    ("pissed", -3.2),
    ("kill", -3.7),
    ("killed", -3.5),
    ("killing", -3.4),
    ("die", -2.9),
    ("died", -2.6),
    ("dead", -3.3),
    ("death", -2.9),
    ("murder", -3.7),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("sad", -2.1),
    ("cry", -2.1),
    ("crying", -2.1),
    ("angry", -2.3),
    ("mad", -2.2),
    ("annoying", -1.7),
    ("annoyed", -1.6),
    ("sick", -2.3),
    ("sucks", -1.5),
    ("suck", -1.9),
    ("sucked", -2.0),
    ("lame", -1.8),
    ("fake", -2.1),
    ("lie", -1.6),
    ("liar", -3.1),
    ("lies", -1.8),
    ("wrong", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("fight", -1.6),
    ("war", -2.9),
    ("attack", -2.1),
    ("evil", -3.4),
    ("disgusting", -2.4),
    ("gross", -2.1),
    ("nasty", -2.6),
    ("dirty", -1.9),
    ("filthy", -2.6),
    ("poor", -2.1),
    ("racist", -3.1),
    ("racism", -3.1),
    ("violence", -3.1),
    ("weak", -1.9),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("fear", -2.2),
    ("shame", -2.1),
    ("sorry", -0.3),
    ("worry", -1.9),
    ("alone", -1.0),
    ("broke", -1.8),
    ("broken", -2.1),
    ("crazy", -1.4),
    ("creepy", -2.0),
    ("destroy", -2.5),
    ("disappointed", -1.9),
    ("enemy", -2.5),
    ("freak", -1.9),
    ("jealous", -2.0),
    ("kick", -0.9),
    ("lonely", -2.1),
    ("lost", -1.3),
    ("mess", -1.5),
    ("miss", -0.6),
    ("pathetic", -2.6),
    ("rape", -3.7),
    ("rude", -2.0),
    ("savage", -2.0),
    ("shut", -1.0),
    ("sin", -2.6),
    ("steal", -2.2),
    ("thief", -2.4),
    ("threat", -2.4),
    ("tired", -1.9),
    ("trouble", -1.7),
    ("ugh", -1.8),
    ("upset", -1.6),
    ("useless", -1.8),
    ("victim", -1.7),
    ("weird", -0.7),
    ("wtf", -2.8),
    ("smh", -1.3),
    ("no", -1.2),
    ("nope", -1.2),
    ("boring", -1.3),
    ("disgrace", -2.2),
    ("hostile", -2.2),
    ("insult", -2.3),
    ("kills", -2.5),
    ("nigga", -1.5),
    ("niggas", -1.5),
    ("nigger", -3.0),
    ("niggers", -3.0),
    ("faggot", -3.2),
    ("fag", -2.9),
    ("queer", -1.2),
    ("ratchet", -1.5),
    ("thot", -2.0),
    ("twat", -2.5),
    ("wench", -1.8),
    ("coon", -2.6),
    ("spic", -2.6),
    ("beaner", -2.6),
    ("cracker", -1.4),
    ("redneck", -1.6),
    ("trashy", -2.2),
];

/// Words that scale the intensity of the word that follows them.
pub const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("fucking", 0.293),
    ("hella", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("most", 0.293),
    ("more", 0.293),
    ("really", 0.293),
    ("so", 0.293),
    ("such", 0.293),
    ("super", 0.293),
    ("too", 0.293),
    ("totally", 0.293),
    ("very", 0.293),
    ("almost", -0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("kinda", -0.293),
    ("less", -0.293),
    ("little", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
    ("sorta", -0.293),
];

/// Words that negate the valence of the words following them.
pub const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent", "without", "wont",
    "wouldnt", "rarely", "seldom", "despite",
];
