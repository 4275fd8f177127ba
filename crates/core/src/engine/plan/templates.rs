use crate::domain::plan::TaskPriority::{self, Critical, High, Low, Medium};
use crate::domain::route::FundingRoute;

pub struct TaskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: TaskPriority,
}

pub struct PhaseTemplate {
    pub title: &'static str,
    pub duration: &'static str,
    pub tasks: &'static [TaskTemplate],
    pub budget: (f64, f64),
    pub hours_per_week: (u32, u32),
    pub milestones: &'static [&'static str],
    pub resources: &'static [&'static str],
}

const fn task(title: &'static str, description: &'static str, priority: TaskPriority) -> TaskTemplate {
    TaskTemplate {
        title,
        description,
        priority,
    }
}

/// Nominal plan length for a full-time founder, in months.
pub const BASELINE_MONTHS: f64 = 6.0;

pub fn phases_for(route: FundingRoute) -> &'static [PhaseTemplate] {
    match route {
        FundingRoute::Bootstrap => BOOTSTRAP,
        FundingRoute::Investor => INVESTOR,
        FundingRoute::Hybrid => HYBRID,
    }
}

const BOOTSTRAP: &[PhaseTemplate] = &[
    PhaseTemplate {
        title: "Validate demand",
        duration: "2-4 weeks",
        tasks: &[
            task(
                "Interview 20 target customers",
                "Confirm the problem is painful enough that people will pay to solve it.",
                Critical,
            ),
            task(
                "Write a one-page problem statement",
                "Summarize who has the problem, how they solve it today and what it costs them.",
                High,
            ),
            task(
                "Launch a landing page with a waitlist",
                "Measure interest with a simple sign-up form before building.",
                Medium,
            ),
        ],
        budget: (0.0, 1_000.0),
        hours_per_week: (20, 30),
        milestones: &["20 customer interviews completed", "Waitlist live"],
        resources: &["Customer interview script", "No-code landing page builder"],
    },
    PhaseTemplate {
        title: "Build the lean MVP",
        duration: "6-8 weeks",
        tasks: &[
            task(
                "Scope the smallest sellable product",
                "Cut the feature list to what a first customer would pay for.",
                Critical,
            ),
            task(
                "Build the core feature set",
                "Ship the scoped features with the simplest stack you know well.",
                Critical,
            ),
            task(
                "Set up payments",
                "Make it possible to charge from day one.",
                High,
            ),
        ],
        budget: (1_000.0, 5_000.0),
        hours_per_week: (30, 45),
        milestones: &["MVP deployed", "Payment flow working end to end"],
        resources: &["Managed hosting free tier", "Payment provider account"],
    },
    PhaseTemplate {
        title: "First paying customers",
        duration: "4-6 weeks",
        tasks: &[
            task(
                "Launch to the waitlist",
                "Convert early sign-ups into the first users.",
                Critical,
            ),
            task(
                "Offer founding-customer pricing",
                "Trade a discount for commitment and feedback.",
                High,
            ),
            task(
                "Collect structured feedback",
                "Run short calls with every paying customer.",
                Medium,
            ),
        ],
        budget: (500.0, 3_000.0),
        hours_per_week: (30, 40),
        milestones: &["First 10 paying customers", "Churn reasons documented"],
        resources: &["Simple CRM", "Feedback survey template"],
    },
    PhaseTemplate {
        title: "Sustainable growth",
        duration: "8-12 weeks",
        tasks: &[
            task(
                "Reach break-even",
                "Grow monthly revenue until it covers operating costs.",
                Critical,
            ),
            task(
                "Add one repeatable acquisition channel",
                "Double down on the channel with the best payback.",
                High,
            ),
            task(
                "Automate onboarding",
                "Remove manual steps that do not scale.",
                Medium,
            ),
        ],
        budget: (2_000.0, 10_000.0),
        hours_per_week: (35, 45),
        milestones: &["Break-even month", "One channel with known acquisition cost"],
        resources: &["Bookkeeping tool", "Marketing automation"],
    },
];

const INVESTOR: &[PhaseTemplate] = &[
    PhaseTemplate {
        title: "Investor readiness",
        duration: "3-4 weeks",
        tasks: &[
            task(
                "Build a financial model",
                "Project revenue, burn and funding needs for the next 24 months.",
                Critical,
            ),
            task(
                "Prepare the pitch deck",
                "Tell the problem, solution, market, traction and team story in 12 slides.",
                Critical,
            ),
            task(
                "Incorporate and clean up the cap table",
                "Make sure ownership and IP assignments are documented.",
                High,
            ),
        ],
        budget: (2_000.0, 8_000.0),
        hours_per_week: (40, 50),
        milestones: &["Financial model reviewed by an advisor", "Pitch deck finished"],
        resources: &["Startup lawyer", "Financial model template"],
    },
    PhaseTemplate {
        title: "Traction proof",
        duration: "6-8 weeks",
        tasks: &[
            task(
                "Ship the MVP to pilot users",
                "Get real usage data investors can check.",
                Critical,
            ),
            task(
                "Track activation and retention",
                "Instrument the product so the numbers are ready for diligence.",
                High,
            ),
            task(
                "Secure letters of intent",
                "Collect written interest from prospective customers.",
                Medium,
            ),
        ],
        budget: (5_000.0, 25_000.0),
        hours_per_week: (45, 60),
        milestones: &["Pilot users active weekly", "Three letters of intent"],
        resources: &["Product analytics", "Pilot agreement template"],
    },
    PhaseTemplate {
        title: "Fundraising",
        duration: "8-12 weeks",
        tasks: &[
            task(
                "Build a target investor list",
                "Shortlist investors who fund your stage and sector.",
                High,
            ),
            task(
                "Run investor meetings",
                "Batch first meetings into a few weeks to create momentum.",
                Critical,
            ),
            task(
                "Negotiate the term sheet",
                "Agree valuation, board composition and investor rights.",
                Critical,
            ),
        ],
        budget: (5_000.0, 20_000.0),
        hours_per_week: (50, 60),
        milestones: &["Term sheet signed", "Round closed"],
        resources: &["Investor CRM", "Data room"],
    },
    PhaseTemplate {
        title: "Scale with capital",
        duration: "6-8 weeks",
        tasks: &[
            task(
                "Hire key roles",
                "Fill the roles the funding plan was built around.",
                Critical,
            ),
            task(
                "Expand go-to-market",
                "Invest in the channels that proved out during traction.",
                High,
            ),
            task(
                "Set up board reporting",
                "Agree a monthly metrics pack with your investors.",
                Medium,
            ),
        ],
        budget: (50_000.0, 200_000.0),
        hours_per_week: (50, 60),
        milestones: &["Key hires onboarded", "First board meeting held"],
        resources: &["Recruiting platform", "Board reporting template"],
    },
];

const HYBRID: &[PhaseTemplate] = &[
    PhaseTemplate {
        title: "Revenue foundation",
        duration: "4-6 weeks",
        tasks: &[
            task(
                "Launch a paid pilot",
                "Charge early customers to prove willingness to pay.",
                Critical,
            ),
            task(
                "Define pricing",
                "Pick a pricing model you can defend to customers and investors.",
                High,
            ),
            task(
                "Track unit economics",
                "Know acquisition cost and contribution margin per customer.",
                Medium,
            ),
        ],
        budget: (1_000.0, 5_000.0),
        hours_per_week: (30, 40),
        milestones: &["First paid pilot", "Pricing page live"],
        resources: &["Payment provider account", "Unit economics spreadsheet"],
    },
    PhaseTemplate {
        title: "Traction and efficiency",
        duration: "6-8 weeks",
        tasks: &[
            task(
                "Grow to consistent monthly revenue",
                "Reach three consecutive months of revenue growth.",
                Critical,
            ),
            task(
                "Document metrics for investors",
                "Keep a clean monthly record of growth, churn and burn.",
                High,
            ),
            task(
                "Build an advisor network",
                "Find two or three advisors who can open investor doors.",
                Medium,
            ),
        ],
        budget: (2_000.0, 10_000.0),
        hours_per_week: (35, 45),
        milestones: &["Three months of revenue growth", "Metrics dashboard shared with advisors"],
        resources: &["Metrics dashboard", "Advisor agreement template"],
    },
    PhaseTemplate {
        title: "Selective fundraising",
        duration: "6-10 weeks",
        tasks: &[
            task(
                "Decide the amount and use of funds",
                "Raise only what accelerates a proven channel.",
                Critical,
            ),
            task(
                "Approach aligned angels",
                "Prefer investors comfortable with a revenue-first strategy.",
                High,
            ),
            task(
                "Close a small round on founder-friendly terms",
                "Keep majority ownership and board control.",
                Critical,
            ),
        ],
        budget: (3_000.0, 15_000.0),
        hours_per_week: (40, 50),
        milestones: &["Round size agreed", "Small round closed"],
        resources: &["Angel network", "Standard convertible note template"],
    },
    PhaseTemplate {
        title: "Balanced scaling",
        duration: "6-8 weeks",
        tasks: &[
            task(
                "Make the first strategic hire",
                "Hire for the biggest bottleneck to growth.",
                Critical,
            ),
            task(
                "Reinvest revenue in the top channel",
                "Combine revenue and new capital behind what already works.",
                High,
            ),
            task(
                "Review the funding route quarterly",
                "Decide whether to stay lean or raise a larger round.",
                Low,
            ),
        ],
        budget: (20_000.0, 80_000.0),
        hours_per_week: (40, 50),
        milestones: &["First hire onboarded", "Quarterly route review held"],
        resources: &["Recruiting platform", "Quarterly review checklist"],
    },
];
