//! Nationality groupings consulted by the priority rules and report views.

pub const FILIPINA: &str = "Filipina";
pub const ETHIOPIAN: &str = "Ethiopian";
pub const INDIAN: &str = "Indian";

/// Country names and the demonym spellings (plural, `(plural)`, `(adj.)`) seen in
/// the nationality column, treated as the African set.
/// Ethiopian is a member; rules that single out Ethiopians are listed separately.
#[rustfmt::skip]
const AFRICAN_NATIONALITIES: &[&str] = &[
    "Algeria", "Algerian", "Algerians", "Algerian (adj.)",
    "Angola", "Angolan", "Angolans", "Angolan (adj.)",
    "Benin", "Beninese", "Beninese (plural)", "Beninese (adj.)",
    "Botswana", "Botswanan", "Botswanans", "Botswanan (adj.)",
    "Burkina Faso", "Burkinabe", "Burkinabe (plural)", "Burkinabe (adj.)",
    "Burundi", "Burundian", "Burundians", "Burundian (adj.)",
    "Cabo Verde", "Cabo Verdean", "Cabo Verdeans", "Cabo Verdean (adj.)",
    "Cameroon", "Cameroonian", "Cameroonians", "Cameroonian (adj.)",
    "Central African Republic", "Central African", "Central Africans", "Central African (adj.)",
    "Chad", "Chadian", "Chadians", "Chadian (adj.)",
    "Comoros", "Comoran", "Comorans", "Comoran (adj.)",
    "Democratic Republic of the Congo", "Congolese (Democratic Republic)", "Congolese (plural)", "Congolese (Democratic Republic adj.)",
    "Republic of the Congo", "Congolese (Republic)", "Congolese (Republic adj.)",
    "Djibouti", "Djiboutian", "Djiboutians", "Djiboutian (adj.)",
    "Egypt", "Egyptian", "Egyptians", "Egyptian (adj.)",
    "Equatorial Guinea", "Equatoguinean", "Equatoguineans", "Equatoguinean (adj.)",
    "Eritrea", "Eritrean", "Eritreans", "Eritrean (adj.)",
    "Eswatini", "Swazi", "Swazis", "Swazi (adj.)",
    "Ethiopia", "Ethiopian", "Ethiopians", "Ethiopian (adj.)",
    "Gabon", "Gabonese", "Gabonese (plural)", "Gabonese (adj.)",
    "Gambia", "Gambian", "Gambians", "Gambian (adj.)",
    "Ghana", "Ghanaian", "Ghanaians", "Ghanaian (adj.)",
    "Guinea", "Guinean", "Guineans", "Guinean (adj.)",
    "Guinea-Bissau", "Bissau-Guinean", "Bissau-Guineans", "Bissau-Guinean (adj.)",
    "Ivory Coast", "Ivorian", "Ivorians", "Ivorian (adj.)",
    "Kenya", "Kenyan", "Kenyans", "Kenyan (adj.)",
    "Lesotho", "Mosotho", "Basotho", "Basotho (adj.)",
    "Liberia", "Liberian", "Liberians", "Liberian (adj.)",
    "Libya", "Libyan", "Libyans", "Libyan (adj.)",
    "Madagascar", "Malagasy", "Malagasy (plural)", "Malagasy (adj.)",
    "Malawi", "Malawian", "Malawians", "Malawian (adj.)",
    "Mali", "Malian", "Malians", "Malian (adj.)",
    "Mauritania", "Mauritanian", "Mauritanians", "Mauritanian (adj.)",
    "Mauritius", "Mauritian", "Mauritians", "Mauritian (adj.)",
    "Morocco", "Moroccan", "Moroccans", "Moroccan (adj.)",
    "Mozambique", "Mozambican", "Mozambicans", "Mozambican (adj.)",
    "Namibia", "Namibian", "Namibians", "Namibian (adj.)",
    "Niger", "Nigerien", "Nigeriens", "Nigerien (adj.)",
    "Nigeria", "Nigerian", "Nigerians", "Nigerian (adj.)",
    "Rwanda", "Rwandan", "Rwandans", "Rwandan (adj.)",
    "São Tomé and Príncipe", "São Toméan", "São Toméans", "São Toméan (adj.)",
    "Senegal", "Senegalese", "Senegalese (plural)", "Senegalese (adj.)",
    "Seychelles", "Seychellois", "Seychellois (plural)", "Seychellois (adj.)",
    "Sierra Leone", "Sierra Leonean", "Sierra Leoneans", "Sierra Leonean (adj.)",
    "Somalia", "Somali", "Somalis", "Somali (adj.)",
    "South Africa", "South African", "South Africans", "South African (adj.)",
    "South Sudan", "South Sudanese", "South Sudanese (plural)", "South Sudanese (adj.)",
    "Sudan", "Sudanese", "Sudanese (plural)", "Sudanese (adj.)",
    "Tanzania", "Tanzanian", "Tanzanians", "Tanzanian (adj.)",
    "Togo", "Togolese", "Togolese (plural)", "Togolese (adj.)",
    "Tunisia", "Tunisian", "Tunisians", "Tunisian (adj.)",
    "Uganda", "Ugandan", "Ugandans", "Ugandan (adj.)",
    "Zambia", "Zambian", "Zambians", "Zambian (adj.)",
    "Zimbabwe", "Zimbabwean", "Zimbabweans", "Zimbabwean (adj.)",
];

pub fn is_african(nationality: &str) -> bool {
    AFRICAN_NATIONALITIES.contains(&nationality)
}

pub fn is_filipina(nationality: &str) -> bool {
    nationality == FILIPINA
}

pub fn is_ethiopian(nationality: &str) -> bool {
    nationality == ETHIOPIAN
}

/// Membership test for the "No-Africans" report views: Ethiopians stay in.
pub fn excluded_from_non_african_view(nationality: &str) -> bool {
    is_african(nationality) && !is_ethiopian(nationality)
}
