//! Static hero roster used when neither the cache nor the upstream can
//! supply names.

/// Hero names known at the time of writing, newest first.
pub const FALLBACK_ROSTER: &[&str] = &[
    "Kalea", "Lukas", "Suyou", "Zhuxin", "Chip", "Cici", "Nolan", "Ixia",
    "Arlott", "Novaria", "Joy", "Fredrinn", "Julian", "Xavier", "Melissa",
    "Yin", "Floryn", "Edith", "Valentina", "Aamon", "Aulus", "Natan",
    "Phoveus", "Beatrix", "Gloo", "Paquito", "Mathilda", "Yve", "Brody",
    "Barats", "Khaleed", "Benedetta", "Luo Yi", "Yu Zhong",
    "Popol and Kupa", "Atlas", "Carmilla", "Cecilion", "Silvanna",
    "Wanwan", "Masha", "Baxia", "Lylia", "Dyrroth", "Ling", "X.Borg",
    "Terizla", "Esmeralda", "Guinevere", "Granger", "Khufra", "Badang",
    "Faramis", "Kadita", "Minsitthar", "Harith", "Thamuz", "Kimmy",
    "Belerick", "Hanzo", "Lunox", "Leomord", "Vale", "Aldous", "Selena",
    "Kaja", "Chang'e", "Hanabi", "Uranus", "Martis", "Gusion", "Angela",
    "Jawhead", "Lesley", "Pharsa", "Helcurt", "Zhask", "Diggie",
    "Lancelot", "Odette", "Argus", "Grock", "Irithel", "Harley",
    "Gatotkaca", "Karrie", "Roger", "Vexana", "Lapu-Lapu", "Aurora",
    "Hilda", "Estes", "Cyclops", "Johnson", "Moskov", "Yi Sun-shin",
    "Ruby", "Alpha", "Chou", "Kagura", "Natalia", "Gord", "Freya",
    "Hayabusa", "Lolita", "Layla", "Fanny", "Zilong", "Eudora",
    "Rafaela", "Clint", "Bruno", "Bane", "Franco", "Akai", "Karina",
    "Alucard", "Tigreal", "Nana", "Alice", "Saber", "Balmond", "Miya",
    "Minotaur", "Sun", "Hylos", "Valir", "Claude",
];
