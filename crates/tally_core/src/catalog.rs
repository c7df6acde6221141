/// A motivational line shown once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub id: u32,
    pub text: &'static str,
    pub author: &'static str,
}

/// Sample titles offered as placeholders when creating a task.
pub const TASK_EXAMPLES: &[&str] = &[
    "Walk the dog",
    "Go for a 30-minute run",
    "Read a chapter of a book",
    "Meditate for 10 minutes",
    "Write a journal entry",
    "Plan tomorrow's schedule",
    "Drink 8 glasses of water",
    "Eat a healthy breakfast",
    "Take daily vitamins",
    "Stretch for 15 minutes",
    "Call a family member",
    "Clear email inbox to zero",
    "Tidy up the workspace",
    "Do a 20-minute HIIT workout",
    "Practice a new language on Duolingo",
    "Watch a tutorial for a new skill",
    "Water the houseplants",
    "Take out the trash and recycling",
    "Start a load of laundry",
    "Empty the dishwasher",
    "Create a grocery list",
    "Meal prep for the next 3 days",
    "Pay outstanding bills",
    "Review monthly budget",
    "Deep clean the bathroom",
    "Vacuum all floors",
    "Organize one drawer or closet",
    "Declutter a shelf or surface",
    "Listen to an educational podcast",
    "Watch a thought-provoking documentary",
    "Write down three things you're grateful for",
    "Set 3 main goals for the week",
    "Review progress on quarterly goals",
    "Connect with a colleague on LinkedIn",
    "Update professional portfolio",
    "Work on a side project for an hour",
    "Fix a nagging bug in the code",
    "Outline a new blog post",
    "Sketch a new UI concept",
    "Code a small feature or component",
    "Read two articles from a tech journal",
    "Prepare agenda for an upcoming meeting",
    "Follow up on important emails",
    "Brainstorm ideas for a new project",
    "Create a mind map for a complex topic",
    "Practice a presentation",
    "Take a 15-minute walk outside",
    "Do some deep breathing exercises",
    "Listen to a calming playlist",
    "Unfollow negative social media accounts",
    "Spend an hour on a favorite hobby",
    "Draw or paint for 30 minutes",
    "Practice a musical instrument",
    "Cook a new, healthy recipe",
    "Bake cookies from scratch",
    "Try a new local coffee shop",
    "Go to the gym for a strength session",
    "Attend a yoga or pilates class",
    "Go for a swim",
    "Go for a bike ride",
    "Plan a weekend hike",
    "Research a future travel destination",
    "Book flights for a vacation",
    "Learn to juggle with 3 balls",
    "Complete a Sudoku or crossword puzzle",
    "Play a board game with family/friends",
    "Watch the sunset or sunrise",
    "Identify three constellations in the night sky",
    "Visit a local museum or art gallery",
    "Find a free local event to attend",
    "Sign up to volunteer for a cause",
    "Donate old clothes to charity",
    "Offer to help a neighbor with a task",
    "Perform a random act of kindness",
    "Give a genuine compliment to someone",
    "Learn a simple magic trick",
    "Write a short poem or story",
    "Organize a folder of old photos",
    "Organize digital files on computer",
    "Backup important data to the cloud",
    "Clean the inside of the car",
    "Get an automatic car wash",
    "Check car tire pressure and fluids",
    "Schedule a dentist appointment",
    "Schedule an annual doctor check-up",
    "Floss teeth thoroughly",
    "Apply a hydrating face mask",
    "Book a haircut appointment",
    "Mow the lawn",
    "Weed the garden beds",
    "Fix a leaky faucet",
    "Change a burnt-out lightbulb",
    "Learn a new knitting stitch",
    "Try a new guided meditation on an app",
    "Listen to an audiobook during commute",
    "Review and update your resume",
    "Learn 5 new keyboard shortcuts",
    "Clean your phone screen and case",
    "Unsubscribe from junk emails",
];

const fn quote(id: u32, text: &'static str, author: &'static str) -> Quote {
    Quote { id, text, author }
}

pub const QUOTES: &[Quote] = &[
    quote(1, "The secret of getting ahead is getting started.", "Mark Twain"),
    quote(2, "It does not matter how slowly you go as long as you do not stop.", "Confucius"),
    quote(3, "Well done is better than well said.", "Benjamin Franklin"),
    quote(4, "We are what we repeatedly do.", "Will Durant"),
    quote(5, "Small deeds done are better than great deeds planned.", "Peter Marshall"),
    quote(6, "Nothing will work unless you do.", "Maya Angelou"),
    quote(7, "Action is the foundational key to all success.", "Pablo Picasso"),
    quote(8, "The journey of a thousand miles begins with one step.", "Lao Tzu"),
    quote(9, "Energy and persistence conquer all things.", "Benjamin Franklin"),
    quote(10, "Quality is not an act, it is a habit.", "Aristotle"),
    quote(11, "What you do today can improve all your tomorrows.", "Ralph Marston"),
    quote(12, "Do what you can, with what you have, where you are.", "Theodore Roosevelt"),
    quote(13, "You miss one hundred percent of the shots you don't take.", "Wayne Gretzky"),
    quote(14, "Motivation is what gets you started. Habit is what keeps you going.", "Jim Ryun"),
    quote(15, "Success is the sum of small efforts, repeated day in and day out.", "Robert Collier"),
    quote(16, "The best time to plant a tree was twenty years ago. The second best time is now.", "Chinese proverb"),
    quote(17, "Either you run the day or the day runs you.", "Jim Rohn"),
    quote(18, "Little by little, one travels far.", "J. R. R. Tolkien"),
    quote(19, "Start where you are. Use what you have. Do what you can.", "Arthur Ashe"),
    quote(20, "Discipline is choosing between what you want now and what you want most.", "Abraham Lincoln"),
    quote(21, "The way to get started is to quit talking and begin doing.", "Walt Disney"),
    quote(22, "Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    quote(23, "Great things are done by a series of small things brought together.", "Vincent van Gogh"),
    quote(24, "Perseverance is not a long race; it is many short races one after the other.", "Walter Elliot"),
    quote(25, "First we make our habits, then our habits make us.", "Charles C. Noble"),
    quote(26, "An ounce of practice is worth more than tons of preaching.", "Mahatma Gandhi"),
    quote(27, "Amateurs sit and wait for inspiration, the rest of us just get up and go to work.", "Stephen King"),
    quote(28, "Believe you can and you're halfway there.", "Theodore Roosevelt"),
    quote(29, "Well begun is half done.", "Aristotle"),
    quote(30, "A year from now you may wish you had started today.", "Karen Lamb"),
    quote(31, "Focus on being productive instead of busy.", "Tim Ferriss"),
    quote(32, "Done is better than perfect.", "Sheryl Sandberg"),
    quote(33, "If you spend too much time thinking about a thing, you'll never get it done.", "Bruce Lee"),
    quote(34, "The future depends on what you do today.", "Mahatma Gandhi"),
    quote(35, "You don't have to be great to start, but you have to start to be great.", "Zig Ziglar"),
    quote(36, "It always seems impossible until it's done.", "Nelson Mandela"),
    quote(37, "Habits change into character.", "Ovid"),
    quote(38, "Dripping water hollows out stone, not through force but through persistence.", "Ovid"),
    quote(39, "One day or day one. You decide.", "Unknown"),
    quote(40, "Slow progress is still progress.", "Unknown"),
];
