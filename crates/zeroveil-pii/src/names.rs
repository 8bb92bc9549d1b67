//! Given names recognized as `PERSON` by the bundled recognizer.
//!
//! Names that double as everyday English words (`Will`, `May`, `Mark`,
//! `Grace`, ...) are left out.

pub(crate) const COMMON_GIVEN_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adam", "Aiden", "Alexander", "Alexandra", "Alice", "Alicia",
    "Alan", "Albert", "Allison", "Amanda", "Amelia", "Amy", "Andrea", "Andrew", "Angela",
    "Anna", "Anne", "Anthony", "Arthur", "Ashley", "Austin", "Barbara", "Benjamin",
    "Betty", "Brandon", "Brenda", "Brian", "Bruce", "Bryan", "Carl", "Carlos", "Carol",
    "Caroline", "Catherine", "Charles", "Charlotte", "Cheryl", "Christina", "Christine",
    "Christopher", "Cynthia", "Daniel", "David", "Deborah", "Dennis", "Diana", "Diane",
    "Donald", "Donna", "Dorothy", "Douglas", "Dylan", "Edward", "Elizabeth", "Ella",
    "Emily", "Emma", "Eric", "Ethan", "Evelyn", "Gabriel", "Gary", "George", "Gerald",
    "Gloria", "Gregory", "Hannah", "Harold", "Harry", "Heather", "Helen", "Henry",
    "Isabella", "Jacob", "James", "Janet", "Jane", "Janice", "Jason", "Jeffrey",
    "Jennifer", "Jeremy", "Jerry", "Jessica", "John", "Jonathan", "Jose", "Joseph",
    "Joshua", "Joyce", "Juan", "Judith", "Julia", "Julie", "Justin", "Karen", "Katherine",
    "Kathleen", "Kayla", "Keith", "Kelly", "Kenneth", "Kevin", "Kimberly", "Kyle",
    "Laura", "Lauren", "Larry", "Liam", "Linda", "Lisa", "Logan", "Lucas", "Madison",
    "Margaret", "Maria", "Marie", "Martha", "Mary", "Matthew", "Megan", "Melissa",
    "Michael", "Michelle", "Nancy", "Natalie", "Nathan", "Nicholas", "Nicole", "Noah",
    "Olivia", "Pamela", "Patricia", "Patrick", "Paul", "Peter", "Rachel", "Raymond",
    "Rebecca", "Richard", "Robert", "Roger", "Ronald", "Russell", "Ryan", "Samantha",
    "Samuel", "Sandra", "Sarah", "Scott", "Sean", "Sharon", "Sophia", "Stephanie",
    "Stephen", "Steven", "Susan", "Teresa", "Thomas", "Timothy", "Tyler", "Victoria",
    "Vincent", "Walter", "William", "Zachary",
];
